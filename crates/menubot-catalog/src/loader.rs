//! CSV dataset loader. Each row is one retrievable chunk of menu text.

use anyhow::{Context, Result};
use menubot_core::types::{MenuEntry, SourceKind};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// One dataset row as it appears on disk. Optional columns default to
/// empty strings so a sparse export still loads.
#[derive(Debug, Deserialize)]
struct RawRow {
    document_id: String,
    chunk_id: String,
    #[serde(default)]
    titulo: String,
    #[serde(default)]
    categoria: String,
    #[serde(default)]
    tipo: String,
    #[serde(default)]
    caminho: String,
    #[serde(default)]
    chunks: String,
}

/// Load the chunk dataset. A missing file or an unreadable row is a
/// startup failure; degraded data (empty titles, unknown categories)
/// is handled later by the catalog.
pub fn load_chunks(path: &Path) -> Result<Vec<MenuEntry>> {
    let file = File::open(path)
        .with_context(|| format!("dataset not found: {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let raw: RawRow = row.with_context(|| format!("malformed dataset row {}", line + 1))?;
        entries.push(MenuEntry {
            document_id: raw.document_id,
            chunk_id: raw.chunk_id,
            title: raw.titulo.trim().to_string(),
            declared_category: raw.categoria,
            source_kind: SourceKind::parse(&raw.tipo),
            path: raw.caminho,
            text: raw.chunks,
        });
    }
    tracing::debug!(rows = entries.len(), "dataset loaded");
    Ok(entries)
}
