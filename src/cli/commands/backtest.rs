//! Backtest command implementation.

use anyhow::{Context, Result};
use macd_backtest::{BacktestEngine, BacktestReport};
use macd_config::AppConfig;
use std::path::Path;
use tracing::info;

use super::{resolve_files, run_per_file};
use crate::cli::{BacktestArgs, OutputFormat};

pub async fn run(args: BacktestArgs, mut config: AppConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let files = resolve_files(&args.data.data, &config.data.files)?;
    let engine = BacktestEngine::new(config.backtest_config());
    info!(
        short = config.indicator.short_window,
        long = config.indicator.long_window,
        signal = config.indicator.signal_window,
        "Starting backtest"
    );

    let reports = run_per_file(files, config.data.price_field, move |series| {
        Ok(engine.run(&series)?)
    })
    .await?;

    // Output results
    match args.data.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.summary());
            }
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    if let Some(dir) = &args.valuation_csv {
        write_valuations(dir, &reports)?;
    }

    Ok(())
}

fn write_valuations(dir: &Path, reports: &[BacktestReport]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for report in reports {
        let path = dir.join(format!("{}_valuation.csv", report.name));
        std::fs::write(&path, report.valuation_to_csv())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(series = %report.name, path = %path.display(), "Valuation written");
    }
    Ok(())
}
