//! State Plotter Module
//! Filters one year's accidents to a state, strips sentinel coordinates and
//! hands the remaining points to a map renderer.

use crate::data::{float_column, int_column, DataLoader, LoaderError, Year};
use polars::prelude::DataFrame;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Longitudes above this encode "not geocoded" in the source data.
pub const LONGITUDE_SENTINEL: f64 = 900.0;
/// Latitudes above this encode "not geocoded" in the source data.
pub const LATITUDE_SENTINEL: f64 = 90.0;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("invalid STATE number: {0}")]
    InvalidState(i64),
    #[error("Failed to render map: {0}")]
    Render(String),
}

/// A FARS state code, coerced to an integer (floats truncate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateCode(pub i64);

impl From<i32> for StateCode {
    fn from(code: i32) -> Self {
        StateCode(i64::from(code))
    }
}

impl From<i64> for StateCode {
    fn from(code: i64) -> Self {
        StateCode(code)
    }
}

impl From<u32> for StateCode {
    fn from(code: u32) -> Self {
        StateCode(i64::from(code))
    }
}

impl From<f64> for StateCode {
    fn from(code: f64) -> Self {
        StateCode(code.trunc() as i64)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sanitized (LONGITUD, LATITUDE) points for one state and year.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPointSet {
    pub state: i64,
    pub year: i32,
    pub points: Vec<(f64, f64)>,
}

impl PlotPointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (min, max) longitude, `None` when empty.
    pub fn longitude_range(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.0))
    }

    /// (min, max) latitude, `None` when empty.
    pub fn latitude_range(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.1))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Rendering backend: draws a base map over the point extents and one
/// marker per point.
pub trait MapRenderer {
    fn render(&mut self, points: &PlotPointSet) -> Result<(), PlotError>;
}

/// How a plot request finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    Rendered { points: usize },
    /// None of the state's accidents has a usable coordinate; nothing was drawn.
    NoAccidents,
}

/// Draws per-state accident maps for a single year.
pub struct StatePlotter<'a> {
    loader: &'a DataLoader,
}

impl<'a> StatePlotter<'a> {
    pub fn new(loader: &'a DataLoader) -> Self {
        Self { loader }
    }

    /// Plot every accident of `state` in `year`.
    ///
    /// Load failures and unknown state codes are errors. A state with nothing
    /// to draw is reported through [`PlotOutcome`] and never reaches the renderer.
    pub fn plot_state<R: MapRenderer + ?Sized>(
        &self,
        state: impl Into<StateCode>,
        year: impl Into<Year>,
        renderer: &mut R,
    ) -> Result<PlotOutcome, PlotError> {
        let state = state.into();
        let year = year.into();
        let df = self.loader.load_year(year)?;

        let points = Self::state_points(&df, state, year)?;
        if points.is_empty() {
            info!(%state, %year, "no accidents to plot");
            return Ok(PlotOutcome::NoAccidents);
        }

        debug!(%state, %year, points = points.len(), "rendering state map");
        renderer.render(&points)?;
        Ok(PlotOutcome::Rendered {
            points: points.len(),
        })
    }

    /// Validate `state` against the table and collect its sanitized points.
    fn state_points(
        df: &DataFrame,
        state: StateCode,
        year: Year,
    ) -> Result<PlotPointSet, PlotError> {
        let states = int_column(df, "STATE")?;
        if !states.contains(&Some(state.0)) {
            return Err(PlotError::InvalidState(state.0));
        }

        let longitudes = float_column(df, "LONGITUD")?;
        let latitudes = float_column(df, "LATITUDE")?;

        let rows: Vec<(Option<f64>, Option<f64>)> = states
            .iter()
            .zip(longitudes.into_iter().zip(latitudes))
            .filter(|(s, _)| **s == Some(state.0))
            .map(|(_, coords)| coords)
            .collect();

        Ok(PlotPointSet {
            state: state.0,
            year: year.value(),
            points: sanitize_coordinates(&rows),
        })
    }
}

/// Drop points whose longitude exceeds 900 or latitude exceeds 90, along with
/// missing or non-finite values.
pub fn sanitize_coordinates(rows: &[(Option<f64>, Option<f64>)]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|&(lon, lat)| match (lon, lat) {
            (Some(lon), Some(lat))
                if lon.is_finite()
                    && lat.is_finite()
                    && lon <= LONGITUDE_SENTINEL
                    && lat <= LATITUDE_SENTINEL =>
            {
                Some((lon, lat))
            }
            _ => None,
        })
        .collect()
}
