use crate::render::{render_catalog, render_text};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use coop_compensation::compensation::{
    run_settlement, write_csv, AllocationStrategy, IndicatorCatalog, Snapshot,
};
use coop_compensation::config::{parse_point_value, EngineConfig};
use coop_compensation::error::AppError;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct SettleArgs {
    /// JSON snapshot of indicators, members and expenses
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Strategy used to split the compensation pool
    #[arg(long, default_value = "equal", value_parser = parse_strategy)]
    pub(crate) strategy: AllocationStrategy,
    /// Override the configured currency value of one point
    #[arg(long, value_parser = parse_point)]
    pub(crate) point_value: Option<f64>,
    /// Only charge expenses active on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Score against a hypothetical patient panel instead of the roster total
    #[arg(long)]
    pub(crate) patients: Option<u32>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_settle(args: SettleArgs, engine: EngineConfig) -> Result<(), AppError> {
    let SettleArgs {
        snapshot,
        strategy,
        point_value,
        as_of,
        patients,
        format,
    } = args;

    let engine = EngineConfig {
        point_value: point_value.unwrap_or(engine.point_value),
    };

    let reader = BufReader::new(File::open(&snapshot)?);
    let mut context = Snapshot::from_json_reader(reader)?.into_context(engine)?;
    if let Some(total) = patients {
        context = context.with_patient_override(total);
    }
    if let Some(date) = as_of {
        context = context.with_as_of(date);
    }
    info!(snapshot = %snapshot.display(), %strategy, "running settlement");

    let report = run_settlement(&context, strategy)?;

    match format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout().lock(), &report)?;
            println!();
        }
        OutputFormat::Csv => write_csv(&report, io::stdout().lock())?,
    }

    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    render_catalog(&IndicatorCatalog::standard());
    Ok(())
}

fn parse_strategy(raw: &str) -> Result<AllocationStrategy, String> {
    raw.parse::<AllocationStrategy>()
        .map_err(|err| err.to_string())
}

fn parse_point(raw: &str) -> Result<f64, String> {
    parse_point_value(raw).map_err(|err| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
