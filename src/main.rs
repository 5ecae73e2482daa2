use std::path::PathBuf;

use anyhow::bail;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

mod aggregate;
mod connectors;
mod engine;
mod equity;
mod health;
mod ingest;
mod models;
mod network;
mod profiles;
mod registry;
mod report;
mod skills;
mod stats;
#[cfg(test)]
mod testutil;
mod themes;
mod trends;

#[derive(Parser)]
#[command(name = "recognition-insights")]
#[command(about = "Organizational analytics over peer-recognition awards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analytics engine and write the dashboard JSON
    Analyze {
        #[arg(long)]
        csv: PathBuf,
        /// Reference date for recency classification (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, default_value = "dashboard.json")]
        out: PathBuf,
    },
    /// Generate a markdown management report
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Print the employee directory with engagement status
    Directory {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Filter by status: thriving, active, passive, at_risk, never_recognized
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
}

fn parse_status(raw: &str) -> anyhow::Result<profiles::EngagementStatus> {
    use profiles::EngagementStatus::*;
    Ok(match raw {
        "thriving" => Thriving,
        "active" => Active,
        "passive" => Passive,
        "at_risk" => AtRisk,
        "never_recognized" => NeverRecognized,
        other => bail!("unknown status {other:?}"),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { csv, as_of, out } => {
            let records = ingest::load_awards(&csv)?;
            let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
            let dashboard = engine::analyze(&records, as_of);
            std::fs::write(&out, serde_json::to_string_pretty(&dashboard)?)?;
            println!(
                "Analyzed {} awards across {} people. Dashboard written to {}.",
                dashboard.kpi.total_awards,
                dashboard.workforce.total_people,
                out.display()
            );
        }
        Commands::Report { csv, as_of, out } => {
            let records = ingest::load_awards(&csv)?;
            let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
            let dashboard = engine::analyze(&records, as_of);
            std::fs::write(&out, report::build_report(&dashboard, as_of))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Directory {
            csv,
            as_of,
            status,
            limit,
        } => {
            let records = ingest::load_awards(&csv)?;
            let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
            let wanted = status.as_deref().map(parse_status).transpose()?;
            let dashboard = engine::analyze(&records, as_of);

            let rows: Vec<_> = dashboard
                .employee_directory
                .iter()
                .filter(|p| wanted.map_or(true, |s| p.status == s))
                .take(limit)
                .collect();
            if rows.is_empty() {
                println!("No matching employees.");
                return Ok(());
            }
            for p in rows {
                println!(
                    "- {} ({}, {}) received {} / given {} — engagement {}, {:?}",
                    p.name, p.dept, p.seniority, p.received, p.given, p.engagement_score, p.status
                );
            }
        }
    }

    Ok(())
}
