//! Order Feature Preprocessing
//!
//! Cleans and encodes order records into a numeric feature table for a
//! binary `CLASS` classifier. Every call refits its encoders from the input
//! unless an [`EncodingVocabulary`] fitted on training data is supplied.

mod age;
mod categorical;
mod config;
mod dates;
mod error;
mod fill;
mod label;
mod preprocessor;
mod schema;
mod time_of_day;
mod vocabulary;

pub use age::{AgeCalculator, CalendarAge};
pub use categorical::OneHotCategories;
pub use config::{DateParsePolicy, EmptyTimePolicy, HandleUnknown, PreprocessConfig};
pub use error::PreprocessError;
pub use fill::forward_fill;
pub use label::LabelCodes;
pub use preprocessor::{preprocess, FeaturePreprocessor, Preprocessed};
pub use schema::{
    AGE_COLUMN, BIRTHDATE_COLUMN, LABEL_COLUMN, LABEL_ENCODED_COLUMNS, ONE_HOT_COLUMNS,
    ORDER_DATE_COLUMN, SENTINEL_ZERO_COLUMNS, TIME_COLUMN,
};
pub use vocabulary::EncodingVocabulary;
