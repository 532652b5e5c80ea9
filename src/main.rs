use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod aggregate;
mod ingest;
mod magnitude;
mod models;
mod report;

use models::Measure;

#[derive(Parser)]
#[command(name = "storm-impact")]
#[command(about = "Ranks weather event types by health and economic impact", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank event types by a single measure
    Rank {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, value_enum)]
        measure: Measure,
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Print the ranked table as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report covering all four measures
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            csv,
            measure,
            top,
            json,
        } => {
            let records = ingest::load_csv(&csv)?;
            let table = report::rank_measure(&records, measure, top)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else if table.entries.is_empty() {
                println!("No events found in {}.", csv.display());
            } else {
                print!("{}", report::render_table(measure, &table));
            }
        }
        Commands::Report { csv, top, out } => {
            let records = ingest::load_csv(&csv)?;
            let rendered = report::build_report(&records, top)?;
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
