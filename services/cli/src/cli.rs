use crate::settle::{run_catalog, run_settle, SettleArgs};
use clap::{Parser, Subcommand};
use coop_compensation::config::AppConfig;
use coop_compensation::error::AppError;
use coop_compensation::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Cooperative Compensation",
    about = "Score indicators and settle compensation and shared costs across cooperative members",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute gross, expense and net amounts per member from a JSON snapshot
    Settle(SettleArgs),
    /// List the standard indicator catalog
    Catalog,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, point_value = config.engine.point_value, "configuration loaded");

    match cli.command {
        Command::Settle(args) => run_settle(args, config.engine),
        Command::Catalog => run_catalog(),
    }
}
