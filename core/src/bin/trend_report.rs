//! Skriver trend-rapport for en JSON-payload.
//!
//! ```bash
//! cargo run --bin trend-report -- payload.json
//! RUST_LOG=info cargo run --bin trend-report -- payload.json --config trend.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gymtrend_core::cli::render_trend_report;
use gymtrend_core::json_api::parse_trend_request;
use gymtrend_core::storage::load_config;
use gymtrend_core::{classify_with, TemplateType, TrendConfig};

#[derive(Parser, Debug)]
#[command(
    name = "trend-report",
    about = "Classify the workout trend for a JSON payload of logs"
)]
struct Args {
    /// JSON payload: { "template_type": ..., "logs": [...], "config"?: {...} }
    payload: PathBuf,

    /// Trend config file (JSON); defaults apply when missing
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(p) => load_config(p).with_context(|| format!("loading config {}", p.display()))?,
        None => TrendConfig::default(),
    };

    let body = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("reading {}", args.payload.display()))?;
    let req = parse_trend_request(&body)?;
    let template: TemplateType = req
        .template_type
        .parse()
        .with_context(|| format!("payload {}", args.payload.display()))?;
    let cfg = req.config.unwrap_or(cfg);
    cfg.validate()?;

    let verdict = classify_with(&req.logs, template, &cfg);
    print!("{}", render_trend_report(&verdict, template, &cfg));
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_payload_and_optional_config() {
        let a = Args::try_parse_from(["trend-report", "logs.json"]).unwrap();
        assert_eq!(a.payload, PathBuf::from("logs.json"));
        assert!(a.config.is_none());

        let a = Args::try_parse_from(["trend-report", "logs.json", "-c", "trend.json"]).unwrap();
        assert_eq!(a.config, Some(PathBuf::from("trend.json")));

        assert!(Args::try_parse_from(["trend-report"]).is_err());
    }
}
