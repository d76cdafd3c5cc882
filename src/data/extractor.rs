//! Yearly Extractor Module
//! Projects each year's accidents down to (MONTH, year) pairs, isolating
//! failures so one unreadable year never sinks a multi-year request.

use crate::data::filename::Year;
use crate::data::loader::{int_column, DataLoader, LoaderError};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// A year that could not be read and was replaced by an empty extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearWarning {
    pub year: i32,
    pub message: String,
}

impl fmt::Display for YearWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid year: {} ({})", self.year, self.message)
    }
}

/// The (MONTH, year) projection of one year's accident table.
///
/// `year` always equals the requested year; it is never read from the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearExtract {
    year: i32,
    months: Vec<u32>,
    warning: Option<YearWarning>,
}

impl YearExtract {
    pub fn new(year: impl Into<Year>, months: Vec<u32>) -> Self {
        Self {
            year: year.into().value(),
            months,
            warning: None,
        }
    }

    /// Empty stand-in for a year that failed to load.
    pub fn failed(year: impl Into<Year>, message: impl Into<String>) -> Self {
        let year = year.into().value();
        Self {
            year,
            months: Vec::new(),
            warning: Some(YearWarning {
                year,
                message: message.into(),
            }),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &[u32] {
        &self.months
    }

    /// Iterate the rows as (MONTH, year) pairs.
    pub fn rows(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.months.iter().map(move |&m| (m, self.year))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn warning(&self) -> Option<&YearWarning> {
        self.warning.as_ref()
    }
}

/// Runs the resolve → load → project step for one or many years.
pub struct YearlyExtractor<'a> {
    loader: &'a DataLoader,
    parallel: bool,
}

impl<'a> YearlyExtractor<'a> {
    pub fn new(loader: &'a DataLoader) -> Self {
        Self {
            loader,
            parallel: false,
        }
    }

    /// Extract years on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load and project one year, propagating any failure.
    pub fn try_extract(&self, year: impl Into<Year>) -> Result<YearExtract, LoaderError> {
        let year = year.into();
        let df = self.loader.load_year(year)?;
        let raw = int_column(&df, "MONTH")?;

        let months: Vec<u32> = raw
            .iter()
            .copied()
            .filter_map(|m| m.and_then(|m| u32::try_from(m).ok()))
            .filter(|m| (1..=12).contains(m))
            .collect();

        let dropped = raw.len() - months.len();
        if dropped > 0 {
            debug!(%year, dropped, "dropped rows without a valid MONTH");
        }

        Ok(YearExtract::new(year, months))
    }

    /// Extract one year, replacing a failure with an empty extract and a warning.
    pub fn extract_one(&self, year: impl Into<Year>) -> YearExtract {
        let year = year.into();
        match self.try_extract(year) {
            Ok(extract) => extract,
            Err(e) => {
                warn!(%year, error = %e, "invalid year");
                YearExtract::failed(year, e.to_string())
            }
        }
    }

    /// Extract every requested year: same length and order as `years`,
    /// duplicates included.
    pub fn extract_many<Y>(&self, years: &[Y]) -> Vec<YearExtract>
    where
        Y: Into<Year> + Copy + Send + Sync,
    {
        if self.parallel {
            years.par_iter().map(|&y| self.extract_one(y)).collect()
        } else {
            years.iter().map(|&y| self.extract_one(y)).collect()
        }
    }
}
