//! Feature table assembly

use crate::age::{AgeCalculator, CalendarAge};
use crate::categorical::OneHotCategories;
use crate::config::{DateParsePolicy, EmptyTimePolicy, PreprocessConfig};
use crate::dates::{epoch_seconds, zero_sentinels, EpochCell};
use crate::error::PreprocessError;
use crate::fill::forward_fill;
use crate::label::LabelCodes;
use crate::schema::{
    required_columns, AGE_COLUMN, BIRTHDATE_COLUMN, LABEL_COLUMN, LABEL_ENCODED_COLUMNS,
    ONE_HOT_COLUMNS, ORDER_DATE_COLUMN, SENTINEL_ZERO_COLUMNS, TIME_COLUMN,
};
use crate::time_of_day::{fill_minutes, mean_minutes, to_minutes};
use crate::vocabulary::EncodingVocabulary;
use order_table::{Column, Table, Value};
use std::fmt;
use tracing::{debug, warn};

/// Result of one preprocessing call
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    /// Feature table, row-aligned with the input
    pub features: Table,
    /// `CLASS` exactly as given, present for training calls only
    pub label: Option<Column>,
}

impl Preprocessed {
    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.features.n_rows()
    }

    /// Split into features and label
    pub fn into_parts(self) -> (Table, Option<Column>) {
        (self.features, self.label)
    }
}

/// Cleans and encodes order records into classifier features
pub struct FeaturePreprocessor {
    config: PreprocessConfig,
    age: Box<dyn AgeCalculator>,
}

impl FeaturePreprocessor {
    /// Create a preprocessor; ages use `CalendarAge` at the configured
    /// reference date, or today
    pub fn new(config: PreprocessConfig) -> Self {
        let age = config
            .reference_date
            .map(CalendarAge::new)
            .unwrap_or_else(CalendarAge::today);
        Self {
            config,
            age: Box::new(age),
        }
    }

    /// Replace the age collaborator
    pub fn with_age_calculator(mut self, age: impl AgeCalculator + 'static) -> Self {
        self.age = Box::new(age);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Preprocess with encoders refit on `input`.
    ///
    /// When `is_train` is set, `CLASS` is required and returned as the label;
    /// otherwise it is dropped if present.
    pub fn preprocess(&self, input: &Table, is_train: bool) -> Result<Preprocessed, PreprocessError> {
        self.fit_transform(input, is_train).map(|(out, _)| out)
    }

    /// Learn the vocabulary of `input` without transforming it
    pub fn fit(&self, input: &Table) -> Result<EncodingVocabulary, PreprocessError> {
        let (table, _) = self.prepare(input, false)?;
        self.fit_prepared(&table)
    }

    /// Learn the vocabulary of `input` and transform it with that vocabulary
    pub fn fit_transform(
        &self,
        input: &Table,
        is_train: bool,
    ) -> Result<(Preprocessed, EncodingVocabulary), PreprocessError> {
        let (table, label) = self.prepare(input, is_train)?;
        let vocab = self.fit_prepared(&table)?;
        let features = self.apply(table, &vocab)?;
        Ok((Preprocessed { features, label }, vocab))
    }

    /// Transform `input` with a previously fitted vocabulary
    pub fn transform(
        &self,
        input: &Table,
        is_train: bool,
        vocab: &EncodingVocabulary,
    ) -> Result<Preprocessed, PreprocessError> {
        let (table, label) = self.prepare(input, is_train)?;
        let features = self.apply(table, vocab)?;
        Ok(Preprocessed { features, label })
    }

    /// Copy the input, split off the label, check columns, forward-fill
    fn prepare(&self, input: &Table, is_train: bool) -> Result<(Table, Option<Column>), PreprocessError> {
        let mut table = input.clone();

        let label = table.remove_column(LABEL_COLUMN);
        if is_train && label.is_none() {
            return Err(PreprocessError::MissingColumn(LABEL_COLUMN.to_string()));
        }
        let label = if is_train { label } else { None };

        for name in required_columns() {
            table.require(name)?;
        }

        let filled = forward_fill(&mut table);
        debug!(
            "Prepared {} rows x {} columns, forward-filled {} cells",
            table.n_rows(),
            table.n_cols(),
            filled
        );
        Ok((table, label))
    }

    fn fit_prepared(&self, table: &Table) -> Result<EncodingVocabulary, PreprocessError> {
        let one_hot = ONE_HOT_COLUMNS
            .iter()
            .map(|name| table.require(name).map(OneHotCategories::fit))
            .collect::<Result<Vec<_>, _>>()?;

        let labels = LABEL_ENCODED_COLUMNS
            .iter()
            .map(|name| table.require(name).map(LabelCodes::fit))
            .collect::<Result<Vec<_>, _>>()?;

        let (minutes, _) = to_minutes(table.require(TIME_COLUMN)?);
        let time_fill = match (mean_minutes(&minutes), self.config.empty_time_policy) {
            (Some(mean), _) => mean,
            (None, EmptyTimePolicy::FillZero) => {
                warn!("{}: no parseable times, filling with 0", TIME_COLUMN);
                0.0
            }
            (None, EmptyTimePolicy::Fail) => return Err(PreprocessError::NoTimeValues(TIME_COLUMN)),
        };

        let vocab = EncodingVocabulary {
            one_hot,
            labels,
            time_fill,
        };
        debug!(
            "Fitted vocabulary: {} indicator columns, {} label columns, time fill {:.2}",
            vocab.indicator_names().len(),
            vocab.labels.len(),
            vocab.time_fill
        );
        Ok(vocab)
    }

    fn apply(&self, mut table: Table, vocab: &EncodingVocabulary) -> Result<Table, PreprocessError> {
        let handle_unknown = self.config.handle_unknown;

        for name in ONE_HOT_COLUMNS {
            let source = table
                .remove_column(name)
                .ok_or_else(|| PreprocessError::MissingColumn(name.to_string()))?;
            for indicator in vocab.one_hot_for(name)?.expand(&source, handle_unknown)? {
                table.push_column(indicator)?;
            }
        }

        let (minutes, unparsed) = to_minutes(table.require(TIME_COLUMN)?);
        if unparsed > 0 {
            debug!("{}: {} unparseable times treated as missing", TIME_COLUMN, unparsed);
        }
        table.replace_values(TIME_COLUMN, fill_minutes(&minutes, vocab.time_fill))?;

        for name in LABEL_ENCODED_COLUMNS {
            let codes = vocab
                .labels_for(name)?
                .encode(table.require(name)?, handle_unknown)?;
            table.replace_values(name, codes)?;
        }

        self.derive_age(&mut table)?;

        let mut zeroed = 0;
        for name in SENTINEL_ZERO_COLUMNS {
            zeroed += zero_sentinels(table.require_mut(name)?.values_mut());
        }
        debug!("Replaced {} placeholders with 0", zeroed);

        self.convert_order_dates(&mut table)?;

        debug!(
            "Built feature table: {} rows x {} columns",
            table.n_rows(),
            table.n_cols()
        );
        Ok(table)
    }

    fn derive_age(&self, table: &mut Table) -> Result<(), PreprocessError> {
        let birthdates = table
            .remove_column(BIRTHDATE_COLUMN)
            .ok_or_else(|| PreprocessError::MissingColumn(BIRTHDATE_COLUMN.to_string()))?;
        let ages: Vec<Value> = birthdates
            .values()
            .iter()
            .map(|b| self.age.age(b).into())
            .collect();

        let missing = ages.iter().filter(|a| a.is_absent()).count();
        if missing > 0 {
            debug!("{}: {} rows without a usable birthdate", AGE_COLUMN, missing);
        }

        if table.contains(AGE_COLUMN) {
            table.replace_values(AGE_COLUMN, ages)?;
        } else {
            table.push_column(Column::new(AGE_COLUMN, ages))?;
        }
        Ok(())
    }

    fn convert_order_dates(&self, table: &mut Table) -> Result<(), PreprocessError> {
        let policy = self.config.date_parse_policy;
        let mut coerced = 0;
        let seconds = table
            .require(ORDER_DATE_COLUMN)?
            .values()
            .iter()
            .enumerate()
            .map(|(row, value)| match epoch_seconds(value) {
                EpochCell::Seconds(s) => Ok(Value::Int(s)),
                EpochCell::Missing => Ok(Value::Absent),
                EpochCell::Unparseable => match policy {
                    DateParsePolicy::Fail => Err(PreprocessError::InvalidDate {
                        column: ORDER_DATE_COLUMN,
                        row,
                        value: value.to_text().into_owned(),
                    }),
                    DateParsePolicy::Coerce => {
                        coerced += 1;
                        Ok(Value::Absent)
                    }
                },
            })
            .collect::<Result<Vec<_>, _>>()?;

        if coerced > 0 {
            warn!("{}: {} unparseable dates left missing", ORDER_DATE_COLUMN, coerced);
        }
        table.replace_values(ORDER_DATE_COLUMN, seconds)?;
        Ok(())
    }
}

impl Default for FeaturePreprocessor {
    fn default() -> Self {
        Self::new(PreprocessConfig::default())
    }
}

impl fmt::Debug for FeaturePreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturePreprocessor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Preprocess `table` with the default configuration, refitting every encoder
pub fn preprocess(table: &Table, is_train: bool) -> Result<Preprocessed, PreprocessError> {
    FeaturePreprocessor::default().preprocess(table, is_train)
}
