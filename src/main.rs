mod cmd;
mod config;
mod core;
mod format;
mod render;
mod utils;

use clap::{Parser, Subcommand};

/// Broker opinion of value generator for multifamily listings
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the self-contained HTML report (the default)
    Build(cmd::build::BuildCommand),
    /// Print headline valuation and return figures
    Summary(cmd::summary::SummaryCommand),
    /// Print returns across a range of list prices
    Matrix(cmd::matrix::MatrixCommand),
    /// Print the rent roll with totals
    RentRoll(cmd::rent_roll::RentRollCommand),
    /// Print the configuration JSON schema or rent roll CSV header
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Command::Build(Default::default())) {
        Command::Build(build) => build.exec(),
        Command::Summary(summary) => summary.exec(),
        Command::Matrix(matrix) => matrix.exec(),
        Command::RentRoll(rent_roll) => rent_roll.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
