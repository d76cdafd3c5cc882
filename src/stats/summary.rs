//! Monthly Summary Module
//! Unions yearly extracts, counts accidents per (year, MONTH) and pivots the
//! counts into one row per month with one column per year.

use crate::data::{YearExtract, YearWarning};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Accident counts for one month, aligned with [`SummaryTable::years`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    pub month: u32,
    /// `None` means no rows were observed for that (month, year).
    pub counts: Vec<Option<usize>>,
}

/// Month-by-year pivot of accident counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    years: Vec<i32>,
    rows: Vec<MonthRow>,
    #[serde(skip)]
    warnings: Vec<YearWarning>,
}

impl SummaryTable {
    /// Build the pivot from extracts in request order.
    ///
    /// Columns follow the first appearance of each year that contributed at
    /// least one row; rows are ascending by month. Extracts for the same year
    /// accumulate into one column.
    pub fn from_extracts(extracts: &[YearExtract]) -> Self {
        let mut years: Vec<i32> = Vec::new();
        let mut months: BTreeSet<u32> = BTreeSet::new();
        let mut counts: HashMap<(i32, u32), usize> = HashMap::new();

        for extract in extracts {
            if !extract.is_empty() && !years.contains(&extract.year()) {
                years.push(extract.year());
            }
            for (month, year) in extract.rows() {
                months.insert(month);
                *counts.entry((year, month)).or_insert(0) += 1;
            }
        }

        let rows = months
            .into_iter()
            .map(|month| MonthRow {
                month,
                counts: years
                    .iter()
                    .map(|&year| counts.get(&(year, month)).copied())
                    .collect(),
            })
            .collect();

        let warnings = extracts
            .iter()
            .filter_map(|e| e.warning().cloned())
            .collect();

        Self {
            years,
            rows,
            warnings,
        }
    }

    /// Year columns, in first-seen order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    pub fn months(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.month).collect()
    }

    /// Count for a cell, `None` when that (month, year) has no data.
    pub fn count(&self, month: u32, year: i32) -> Option<usize> {
        let col = self.years.iter().position(|&y| y == year)?;
        self.rows
            .iter()
            .find(|r| r.month == month)
            .and_then(|r| r.counts[col])
    }

    /// Sum of every present cell.
    pub fn total(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.counts.iter().flatten())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() && self.rows.is_empty()
    }

    /// Years that failed to load and were left out.
    pub fn warnings(&self) -> &[YearWarning] {
        &self.warnings
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const WIDTH: usize = 6;

        write!(f, "{:>5}", "MONTH")?;
        for year in &self.years {
            write!(f, " {:>WIDTH$}", year)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:>5}", row.month)?;
            for count in &row.counts {
                match count {
                    Some(n) => write!(f, " {:>WIDTH$}", n)?,
                    None => write!(f, " {:>WIDTH$}", "NA")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
