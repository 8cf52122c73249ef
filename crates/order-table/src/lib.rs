//! Order Record Tables
//!
//! Provides the tagged cell value, named columns, and the row-ordered table
//! that the feature preprocessor consumes and produces.

mod error;
mod json;
mod table;
mod value;

pub use error::TableError;
pub use table::{Column, Table};
pub use value::{Value, SENTINEL};
