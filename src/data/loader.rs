//! Accident Table Loader Module
//! Reads a year's bzip2-compressed CSV into a Polars DataFrame.

use crate::data::filename::{make_filename, Year};
use bzip2::read::MultiBzDecoder;
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Rows sampled when inferring column types.
const INFER_SCHEMA_ROWS: usize = 10000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file '{}' does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read table: {0}")]
    Table(#[from] PolarsError),
}

/// Loads yearly accident tables from a data directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a year's file inside the data directory.
    pub fn path_for(&self, year: impl Into<Year>) -> PathBuf {
        self.data_dir.join(make_filename(year))
    }

    /// Load the table for one year.
    pub fn load_year(&self, year: impl Into<Year>) -> Result<DataFrame, LoaderError> {
        self.load(&self.path_for(year))
    }

    /// Load a `.csv.bz2` file, keeping every column in source order.
    ///
    /// Fails with [`LoaderError::MissingFile`] when the path does not exist;
    /// decompression and parse failures come back as the other variants.
    pub fn load(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::MissingFile(path.to_path_buf()));
        }

        let io_err = |source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let mut bytes = Vec::new();
        MultiBzDecoder::new(file)
            .read_to_end(&mut bytes)
            .map_err(io_err)?;

        let options = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS));
        let df = options
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        debug!(path = %path.display(), rows = df.height(), "loaded accident table");
        Ok(df)
    }
}

/// Read a column as 64-bit integers; values that cannot be cast become `None`.
pub fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, LoaderError> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().collect())
}

/// Read a column as 64-bit floats; values that cannot be cast become `None`.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}
