mod db;
mod ingest;
mod parser;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ripjobs", about = "RIP job report extractor and deduplicating ingester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse report dumps and persist new jobs (duplicates are skipped)
    Ingest {
        /// One or more HTML dump files
        files: Vec<PathBuf>,
    },
    /// Parse one dump and print the extracted records as JSON, no storage
    Extract {
        file: PathBuf,
    },
    /// Show ingestion statistics
    Stats,
    /// Ingested jobs overview table
    Overview {
        /// Filter by printer name (substring match)
        #[arg(short, long)]
        printer: Option<String>,
        /// Filter by status (completed, error, unknown)
        #[arg(short, long)]
        status: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest { files } => {
            if files.is_empty() {
                println!("No input files. Pass one or more dump files.");
                return Ok(());
            }
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            ingest_files(&conn, &files)
        }
        Commands::Extract { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let records = parser::extract(&raw);
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Jobs:      {}", s.total);
            println!("Completed: {}", s.completed);
            println!("Errors:    {}", s.errors);
            println!("Unknown:   {}", s.unknown);
            println!("Printers:  {}", s.printers);
            Ok(())
        }
        Commands::Overview { printer, status, limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, printer.as_deref(), status.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No jobs found.");
                return Ok(());
            }

            println!(
                "{:>5} | {:>3} | {:<19} | {:<9} | {:<32} | {:<18} | {:<19}",
                "ID", "Tbl", "Ingested", "Status", "File", "Printer", "RIP start"
            );
            println!("{}", "-".repeat(122));
            for r in &rows {
                println!(
                    "{:>5} | {:>3} | {:<19} | {:<9} | {:<32} | {:<18} | {:<19}",
                    r.id,
                    r.table_number,
                    truncate(&r.created_at, 19),
                    truncate(&r.job_status, 9),
                    truncate(&r.file_path, 32),
                    truncate(&r.printer_name, 18),
                    truncate(&r.rip_start, 19),
                );
            }
            println!("\n{} jobs", rows.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Parse all dumps in parallel, then write to storage sequentially in input
/// order (dedup lookups must stay ordered against a single DB).
fn ingest_files(conn: &rusqlite::Connection, files: &[PathBuf]) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let parsed: Vec<anyhow::Result<Vec<parser::JobRecord>>> = files
        .par_iter()
        .map(|path| {
            let raw = std::fs::read_to_string(path)?;
            Ok(parser::extract(&raw))
        })
        .collect();

    let mut found = 0usize;
    let mut new = 0usize;
    let mut duplicates = 0usize;

    for (path, records) in files.iter().zip(parsed) {
        match records {
            Ok(records) => {
                let summary = ingest::ingest_records(conn, records)?;
                println!(
                    "{}: {} found, {} new, {} duplicates",
                    path.display(),
                    summary.found,
                    summary.new,
                    summary.duplicates
                );
                found += summary.found;
                new += summary.new;
                duplicates += summary.duplicates;
            }
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!(
        "Total: {} jobs found, {} new, {} duplicates.",
        found, new, duplicates
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
