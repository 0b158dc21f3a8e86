use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use fortune_lite::ingest::{builder, scanner};
use fortune_lite::FortuneDb;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of fortune files, with offensive files under `off/`.
    #[arg(short, long)]
    fortunes_dir: PathBuf,

    /// Where to write the compiled database.
    #[arg(short, long)]
    db_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("Compiling fortunes from {:?}", args.fortunes_dir);
    info!("Database: {:?}", args.db_path);

    // Wholesale rebuild: any previous database file is discarded first.
    if args.db_path.is_file() {
        fs::remove_file(&args.db_path).context("Failed to remove old database")?;
        info!("Removed old database");
    }

    let db = FortuneDb::open(&args.db_path).context("Failed to create database")?;

    let sources = scanner::collect_sources(&args.fortunes_dir)
        .context("Failed to scan fortunes directory")?;

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .context("Invalid progress template")?,
    );

    let mut fortunes = 0;
    for source in &sources {
        pb.set_message(source.name.clone());
        fortunes += builder::ingest_source(&db, source)
            .with_context(|| format!("Failed to ingest {:?}", source.path))?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    db.close().context("Failed to close database")?;

    info!(
        "Build complete: {} categories, {} fortunes",
        sources.len(),
        fortunes
    );
    Ok(())
}
