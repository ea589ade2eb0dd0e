pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "trendscope",
    about = "Trendscope operator CLI",
    long_about = "Inspect configuration, query the trend catalog offline, score products, and smoke-test a running server.",
    after_help = "Examples:\n  trendscope regions\n  trendscope trends united-states technology\n  trendscope analyze --region canada --category home --product \"smart locks\"\n  trendscope smoke --base-url http://127.0.0.1:3000"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "List the regions defined by the configured trend catalog")]
    Regions,
    #[command(about = "Show the trends for a region, or for one category of a region")]
    Trends {
        #[arg(help = "Region identifier (case-insensitive)")]
        region: String,
        #[arg(help = "Category identifier (case-insensitive)")]
        category: Option<String>,
    },
    #[command(about = "Score a product against a region/category trend list")]
    Analyze {
        #[arg(long)]
        region: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        product: String,
    },
    #[command(about = "Exercise every endpoint of a running server and report per-check timing")]
    Smoke {
        #[arg(long, help = "Server base URL (defaults to the configured bind address and port)")]
        base_url: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => commands::config::run(),
        Command::Regions => commands::catalog::regions(),
        Command::Trends { region, category } => {
            commands::catalog::trends(&region, category.as_deref())
        }
        Command::Analyze { region, category, product } => {
            commands::analyze::run(&region, &category, &product)
        }
        Command::Smoke { base_url } => commands::smoke::run(base_url.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
