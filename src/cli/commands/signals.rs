//! Signals command implementation.

use anyhow::Result;
use macd_config::AppConfig;
use macd_core::types::{PriceSeries, SignalKind, SignalSet};
use macd_indicators::{compute_indicators, IndicatorSeries};
use macd_signals::signals_for;
use serde::Serialize;
use std::fmt::Write;

use super::{resolve_files, run_per_file};
use crate::cli::{OutputFormat, SignalsArgs};

/// Crossovers found in one price history.
#[derive(Serialize)]
struct SignalListing {
    name: String,
    #[serde(skip)]
    prices: PriceSeries,
    #[serde(skip)]
    indicators: IndicatorSeries,
    signals: SignalSet,
}

impl SignalListing {
    fn render(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "{}: {} bars, {} buys, {} sells",
            self.name,
            self.prices.len(),
            self.signals.buys.len(),
            self.signals.sells.len()
        );

        for (index, kind) in self.signals.events() {
            let date = self.prices.get(index).map(|p| p.date.as_str()).unwrap_or("?");
            let price = self.prices.get(index).map(|p| p.price).unwrap_or(f64::NAN);
            let macd = self.indicators.macd.get(index).unwrap_or(f64::NAN);
            let signal = self.indicators.signal.get(index).unwrap_or(f64::NAN);
            let marker = match kind {
                SignalKind::Buy => "+",
                SignalKind::Sell => "-",
            };
            let _ = writeln!(
                s,
                "  {} {:>6} {:<12} {:<4} price {:>12.4}  macd {:>10.4}  signal {:>10.4}",
                marker, index, date, kind, price, macd, signal
            );
        }
        s
    }
}

pub async fn run(args: SignalsArgs, mut config: AppConfig) -> Result<()> {
    args.data.apply(&mut config);
    config.validate()?;

    let files = resolve_files(&args.data.data, &config.data.files)?;
    let macd = config.indicator.clone();

    let listings = run_per_file(files, config.data.price_field, move |series| {
        let indicators = compute_indicators(&series.prices(), &macd)?;
        let signals = signals_for(&indicators)?;
        Ok(SignalListing {
            name: series.name.clone(),
            prices: series,
            indicators,
            signals,
        })
    })
    .await?;

    match args.data.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
        OutputFormat::Text => {
            for listing in &listings {
                print!("{}", listing.render());
            }
        }
    }

    Ok(())
}
