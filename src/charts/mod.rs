//! Charts module - state accident maps

mod plotter;
mod renderer;

pub use plotter::{
    sanitize_coordinates, MapRenderer, PlotError, PlotOutcome, PlotPointSet, StateCode,
    StatePlotter, LATITUDE_SENTINEL, LONGITUDE_SENTINEL,
};
pub use renderer::StaticMapRenderer;
