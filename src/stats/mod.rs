//! Stats module - monthly accident summaries

mod summary;

pub use summary::{MonthRow, SummaryTable};
