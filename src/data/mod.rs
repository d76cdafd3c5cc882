//! Data module - yearly file loading and extraction

mod extractor;
mod filename;
mod loader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::{YearExtract, YearWarning, YearlyExtractor};
pub use filename::{make_filename, Year};
pub use loader::{float_column, int_column, DataLoader, LoaderError};
