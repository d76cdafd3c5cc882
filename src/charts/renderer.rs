//! Static Map Renderer
//! Draws a state's accident locations as a PNG with plotters.
//!
//! Layout:
//! 1. Title: "STATE {code}, {year}" centered
//! 2. Longitude/latitude graticule scaled to the point extents
//! 3. One filled marker per accident

use crate::charts::plotter::{MapRenderer, PlotError, PlotPointSet};
use plotters::prelude::*;
use std::path::PathBuf;

const MARKER: RGBColor = RGBColor(192, 57, 43);
const MIN_PAD_DEGREES: f64 = 0.5;

/// Writes each rendered map to `output`, replacing any previous file.
#[derive(Debug, Clone)]
pub struct StaticMapRenderer {
    output: PathBuf,
    width: u32,
    height: u32,
}

impl StaticMapRenderer {
    pub fn new(output: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output: output.into(),
            width,
            height,
        }
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }
}

impl MapRenderer for StaticMapRenderer {
    fn render(&mut self, points: &PlotPointSet) -> Result<(), PlotError> {
        let (Some(lon), Some(lat)) = (points.longitude_range(), points.latitude_range()) else {
            return Err(PlotError::Render("no points to draw".into()));
        };
        let (x0, x1) = padded(lon);
        let (y0, y1) = padded(lat);

        let root = BitMapBackend::new(&self.output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("STATE {}, {}", points.state, points.year),
                ("sans-serif", 22),
            )
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(48)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .light_line_style(RGBColor(235, 235, 235).stroke_width(1))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                points
                    .points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 2, MARKER.filled())),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

/// Widen an extent so single points and edge markers stay visible.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = ((hi - lo) * 0.05).max(MIN_PAD_DEGREES);
    (lo - pad, hi + pad)
}

fn render_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::Render(e.to_string())
}
