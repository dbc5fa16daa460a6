mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use equity_core::bilingual::Language;

use commands::check::CheckArgs;
use commands::config::ConfigArgs;
use commands::edit::EditArgs;
use commands::extract::ExtractArgs;
use commands::show::ShowArgs;

/// View, edit and extract bilingual statements of changes in equity
#[derive(Parser)]
#[command(
    name = "equity",
    version,
    about = "View, edit and extract bilingual statements of changes in equity",
    long_about = "A CLI for reviewing Arabic/English statements of changes in equity. \
                  Renders the statement, applies path-addressed corrections with a full \
                  edit history, uploads PDFs to an extraction endpoint and checks the \
                  retained earnings schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Label language: ar, en or both
    #[arg(long, default_value = "both", global = true)]
    lang: Language,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the statement tables
    Show(ShowArgs),
    /// Apply one or more edits and optionally save the result
    Edit(EditArgs),
    /// Upload a PDF to the extraction endpoint
    Extract(ExtractArgs),
    /// Show or change the stored extraction endpoint
    Config(ConfigArgs),
    /// Reconcile the retained earnings movements
    Check(CheckArgs),
    /// Print the built-in sample statement
    Sample,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Show(args) => commands::show::run_show(args, cli.lang),
        Commands::Edit(args) => commands::edit::run_edit(args),
        Commands::Extract(args) => commands::extract::run_extract(args),
        Commands::Config(args) => commands::config::run_config(args),
        Commands::Check(args) => commands::check::run_check(args),
        Commands::Sample => Ok(equity_core::sample::sample_document()),
        Commands::Version => {
            println!("equity {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
