//! File Name Resolver
//! Maps a calendar year onto the canonical name of its accident file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar year, coerced to an integer.
///
/// Conversions from floating point truncate toward zero, so `2013.9`
/// becomes `2013`. Values outside the `i32` range saturate at its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl Year {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Year {
    fn from(year: i32) -> Self {
        Year(year)
    }
}

impl From<i64> for Year {
    fn from(year: i64) -> Self {
        Year(i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX }))
    }
}

impl From<u16> for Year {
    fn from(year: u16) -> Self {
        Year(i32::from(year))
    }
}

impl From<u32> for Year {
    fn from(year: u32) -> Self {
        Year(i32::try_from(year).unwrap_or(i32::MAX))
    }
}

impl From<f64> for Year {
    fn from(year: f64) -> Self {
        Year(year.trunc() as i32)
    }
}

impl From<f32> for Year {
    fn from(year: f32) -> Self {
        Year(year.trunc() as i32)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the file name for a year's accident data, e.g. `accident_2013.csv.bz2`.
pub fn make_filename(year: impl Into<Year>) -> String {
    format!("accident_{}.csv.bz2", year.into().value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_year() {
        assert_eq!(make_filename(2013), "accident_2013.csv.bz2");
        assert_eq!(make_filename(2015_i64), "accident_2015.csv.bz2");
    }

    #[test]
    fn fractional_year_truncates() {
        assert_eq!(make_filename(2013.9), "accident_2013.csv.bz2");
        assert_eq!(make_filename(2014.1_f32), "accident_2014.csv.bz2");
    }

    #[test]
    fn wide_integers_saturate() {
        assert_eq!(Year::from(4_294_969_309_i64), Year(i32::MAX));
        assert_eq!(Year::from(-4_294_969_309_i64), Year(i32::MIN));
        assert_eq!(Year::from(u32::MAX), Year(i32::MAX));
        assert_eq!(Year::from(2016_u32), Year(2016));
        assert_eq!(Year::from(1e12), Year(i32::MAX));
    }

    #[test]
    fn no_padding_or_separators() {
        assert_eq!(make_filename(987), "accident_987.csv.bz2");
        assert_eq!(make_filename(12345), "accident_12345.csv.bz2");
    }
}
