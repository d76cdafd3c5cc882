//! FARS pipeline: year extraction, monthly summaries and state maps over one
//! data directory.

use crate::charts::{MapRenderer, PlotError, PlotOutcome, StateCode, StatePlotter};
use crate::config::PipelineConfig;
use crate::data::{DataLoader, LoaderError, Year, YearExtract, YearlyExtractor};
use crate::stats::SummaryTable;
use polars::prelude::DataFrame;
use tracing::info;

pub struct FarsPipeline {
    loader: DataLoader,
    parallel: bool,
}

impl FarsPipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            loader: DataLoader::new(&config.data_dir),
            parallel: config.parallel,
        }
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    fn extractor(&self) -> YearlyExtractor<'_> {
        YearlyExtractor::new(&self.loader).parallel(self.parallel)
    }

    /// Full table for one year.
    pub fn read_year(&self, year: impl Into<Year>) -> Result<DataFrame, LoaderError> {
        self.loader.load_year(year)
    }

    pub fn extract_year(&self, year: impl Into<Year>) -> YearExtract {
        self.extractor().extract_one(year)
    }

    pub fn extract_years<Y>(&self, years: &[Y]) -> Vec<YearExtract>
    where
        Y: Into<Year> + Copy + Send + Sync,
    {
        self.extractor().extract_many(years)
    }

    /// Monthly accident counts for `years`. Unreadable years are skipped with
    /// a warning rather than failing the whole request.
    pub fn summarize_years<Y>(&self, years: &[Y]) -> SummaryTable
    where
        Y: Into<Year> + Copy + Send + Sync,
    {
        let extracts = self.extract_years(years);
        let table = SummaryTable::from_extracts(&extracts);
        info!(
            requested = years.len(),
            columns = table.years().len(),
            skipped = table.warnings().len(),
            accidents = table.total(),
            "summarized years"
        );
        table
    }

    pub fn map_state<R: MapRenderer + ?Sized>(
        &self,
        state: impl Into<StateCode>,
        year: impl Into<Year>,
        renderer: &mut R,
    ) -> Result<PlotOutcome, PlotError> {
        StatePlotter::new(&self.loader).plot_state(state, year, renderer)
    }
}
