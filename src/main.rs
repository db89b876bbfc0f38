use std::error::Error;
use std::io;

use dubai_bank_analysis::{build_renderer, AnalysisConfig, Pipeline};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Single optional argument: a TOML configuration file
    let config = match std::env::args().nth(1) {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let mut renderer = build_renderer(&config.charts)?;
    let pipeline = Pipeline::new(config);
    let mut out = io::stdout();

    let report = match renderer.as_mut() {
        Some(renderer) => pipeline.run(Some(&mut **renderer), &mut out)?,
        None => pipeline.run(None, &mut out)?,
    };

    log::info!(
        "Analysed {} rows of {} banks, summary saved to {}",
        report.rows,
        report.summary.len(),
        report.output_path.display()
    );
    Ok(())
}
