//! FARS - Accident Data Loading, Monthly Summaries & State Maps
//!
//! Reads the yearly `accident_<year>.csv.bz2` files of the Fatality Analysis
//! Reporting System, counts accidents per month across years and draws
//! per-state accident maps.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;

pub use charts::{MapRenderer, PlotError, PlotOutcome, StateCode, StaticMapRenderer};
pub use config::{MapRequest, PipelineConfig};
pub use data::{make_filename, DataLoader, LoaderError, Year, YearExtract, YearWarning};
pub use pipeline::FarsPipeline;
pub use stats::SummaryTable;
