//! Screener CLI
//!
//! Reads and writes the camelCase wire form of saved credit-bond screens:
//! normalize a document, validate it, or create a new one from flags.

mod report;

use std::error::Error;
use std::io::Read;

use chrono::Utc;
use clap::{Parser, Subcommand};
use screener_target::{Screen, ScreenerQueryBuilder};

use crate::report::{Report, ScreenSummary};

/// Screener CLI -- saved credit-bond screens.
#[derive(Parser, Debug)]
#[command(name = "screener", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a screen and print its canonical wire form
    Normalize {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Decode a screen and print a JSON report
    Validate {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Build a new screen from flags and print its wire form
    New {
        /// Screen name
        #[arg(long)]
        name: String,

        /// Query builder name
        #[arg(long = "query-name")]
        query_name: Option<String>,

        /// Screen ID
        #[arg(long)]
        id: Option<String>,

        /// Active flag
        #[arg(long)]
        active: Option<bool>,

        /// Owner ID
        #[arg(long = "owner-id")]
        owner_id: Option<String>,

        /// Stamp creator ID and the current time
        #[arg(long = "created-by")]
        created_by: Option<String>,
    },
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
    }
}

fn print_screen(screen: &Screen, compact: bool) -> Result<(), Box<dyn Error>> {
    let text = if compact {
        screener_target::to_json(screen)?
    } else {
        screener_target::to_json_pretty(screen)?
    };
    println!("{text}");
    Ok(())
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Normalize { input, compact } => {
            let text = read_input(&input)?;
            let screen: Screen = screener_target::from_json(&text)?;
            tracing::info!(input = %input, id = ?screen.id, "Normalized screen");
            print_screen(&screen, compact)
        }
        Command::Validate { input } => {
            let text = read_input(&input)?;
            match screener_target::from_json::<Screen>(&text) {
                Ok(screen) => {
                    tracing::info!(input = %input, "Screen is valid");
                    let report = Report::success("valid screen", ScreenSummary::from(&screen));
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
                Err(e) => {
                    println!("{}", serde_json::to_string_pretty(&Report::failure(e.to_string()))?);
                    Err(e.into())
                }
            }
        }
        Command::New {
            name,
            query_name,
            id,
            active,
            owner_id,
            created_by,
        } => {
            let mut query_builder = ScreenerQueryBuilder::new();
            query_builder.name = query_name;

            let mut screen = Screen::new(name, query_builder);
            screen.id = id;
            screen.active = active;
            screen.owner_id = owner_id;
            if let Some(creator) = created_by {
                screen = screen.with_created(creator, Utc::now());
            }
            tracing::debug!(?screen, "Built screen");
            print_screen(&screen, false)
        }
    }
}

fn main() {
    // Initialize logging on stderr so stdout carries only JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
