use std::fs;
use std::path::Path;

use tracing::info;

use crate::database::handle::FortuneDb;
use crate::error::{FortuneError, Result};
use crate::ingest::parser;
use crate::ingest::scanner::{self, SourceFile};

/// Counts reported by a completed build.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub categories: usize,
    pub fortunes: usize,
}

/// Ingests a single source file: one category row, then one fortune row per
/// extracted entry. Returns how many fortunes were inserted.
///
/// An unreadable file aborts the build; rows already written for earlier
/// files stay in place (a failed build is repaired by rebuilding wholesale).
pub fn ingest_source(db: &FortuneDb, source: &SourceFile) -> Result<usize> {
    let data = fs::read_to_string(&source.path).map_err(|e| FortuneError::SourceIo {
        path: source.path.clone(),
        source: e,
    })?;

    let category = db.insert_category(&source.name, source.offensive)?;
    let entries = parser::extract_entries(&data);
    for entry in &entries {
        db.insert_fortune(category, entry)?;
    }
    Ok(entries.len())
}

/// Scans `fortunes_dir` and ingests every source file it finds.
pub fn build_database(db: &FortuneDb, fortunes_dir: &Path) -> Result<BuildSummary> {
    let sources = scanner::collect_sources(fortunes_dir)?;

    let mut summary = BuildSummary::default();
    for source in &sources {
        let count = ingest_source(db, source)?;
        info!(name = %source.name, offensive = source.offensive, fortunes = count, "added file");
        summary.categories += 1;
        summary.fortunes += count;
    }
    Ok(summary)
}
