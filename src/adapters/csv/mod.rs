//! CSV upload parsing.

mod sheet_reader;

pub use sheet_reader::{read_sheet, Sheet};
