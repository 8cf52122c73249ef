//! Hard-coded order export columns

/// Target column, split out of the features
pub const LABEL_COLUMN: &str = "CLASS";

/// Columns expanded into one indicator column per category
pub const ONE_HOT_COLUMNS: [&str; 4] = ["Z_METHODE", "Z_CARD_ART", "Z_LAST_NAME", "WEEKDAY_ORDER"];

/// Order time of day, converted to minutes past midnight
pub const TIME_COLUMN: &str = "TIME_ORDER";

/// Flag and check columns replaced by sorted integer codes
pub const LABEL_ENCODED_COLUMNS: [&str; 17] = [
    "B_EMAIL",
    "B_TELEFON",
    "FLAG_NEWSLETTER",
    "CHK_LADR",
    "CHK_RADR",
    "CHK_KTO",
    "CHK_CARD",
    "CHK_COOKIE",
    "CHK_IP",
    "FAIL_LPLZ",
    "FAIL_LORT",
    "FAIL_LPLZORTMATCH",
    "FAIL_RPLZ",
    "FAIL_RORT",
    "FAIL_RPLZORTMATCH",
    "NEUKUNDE",
    "FLAG_LRIDENTISCH",
];

/// Customer birthdate, replaced by [`AGE_COLUMN`]
pub const BIRTHDATE_COLUMN: &str = "B_BIRTHDATE";

/// Derived age in whole years
pub const AGE_COLUMN: &str = "AGE";

/// Columns whose `"?"` placeholder means zero
pub const SENTINEL_ZERO_COLUMNS: [&str; 12] = [
    "ANUMMER_02",
    "ANUMMER_03",
    "ANUMMER_04",
    "ANUMMER_05",
    "ANUMMER_06",
    "ANUMMER_07",
    "ANUMMER_08",
    "ANUMMER_09",
    "ANUMMER_10",
    "DATE_LORDER",
    "MAHN_AKT",
    "MAHN_HOECHST",
];

/// Date of the customer's last order, converted to epoch seconds
pub const ORDER_DATE_COLUMN: &str = "DATE_LORDER";

/// Every column a call touches, in the order it is checked
pub(crate) fn required_columns() -> impl Iterator<Item = &'static str> {
    ONE_HOT_COLUMNS
        .into_iter()
        .chain(std::iter::once(TIME_COLUMN))
        .chain(LABEL_ENCODED_COLUMNS)
        .chain(std::iter::once(BIRTHDATE_COLUMN))
        .chain(SENTINEL_ZERO_COLUMNS)
}
