//! FARS driver - summarizes the configured years and draws the configured
//! state map.

use anyhow::{Context, Result};
use fars::config::CONFIG_FILE;
use fars::{FarsPipeline, PipelineConfig, PlotOutcome, StaticMapRenderer};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let config = PipelineConfig::load_or_default(Path::new(CONFIG_FILE))?;

    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();
    info!(data_dir = %config.data_dir.display(), "startup");

    let fars = FarsPipeline::new(&config);

    let summary = fars.summarize_years(&config.years);
    print!("{summary}");

    if let Some(path) = &config.summary_output {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote summary");
    }

    if let Some(map) = &config.map {
        let mut renderer = StaticMapRenderer::new(map.output.clone(), map.width, map.height);
        match fars.map_state(map.state, map.year, &mut renderer)? {
            PlotOutcome::Rendered { points } => {
                info!(points, path = %map.output.display(), "wrote state map");
            }
            PlotOutcome::NoAccidents => {}
        }
    }

    Ok(())
}
