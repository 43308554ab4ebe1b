//! Domain types shared by the catalog, retrieval, and answer crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four official menu categories, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tradicional,
    Especialidade,
    Salada,
    Sobremesa,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tradicional,
        Category::Especialidade,
        Category::Salada,
        Category::Sobremesa,
    ];

    /// Resolve a free-text label by keyword-stem containment.
    ///
    /// The stems are checked in a fixed priority order and the first hit
    /// wins; a label mentioning more than one stem resolves to whichever
    /// is checked first. `label` must already be normalized
    /// (see [`crate::normalize::normalize`]).
    pub fn from_label(label: &str) -> Option<Category> {
        if label.contains("tradicion") {
            return Some(Category::Tradicional);
        }
        if label.contains("especial") {
            return Some(Category::Especialidade);
        }
        if label.contains("salad") {
            return Some(Category::Salada);
        }
        if label.contains("sobremes") {
            return Some(Category::Sobremesa);
        }
        None
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Tradicional => "Tradicional",
            Category::Especialidade => "Especialidade",
            Category::Salada => "Salada",
            Category::Sobremesa => "Sobremesa",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which ingestion path produced a chunk.
///
/// PDF rows are the authoritative textual menu; other kinds may carry
/// noisier duplicates and are skipped when building title indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Pdf,
    Other,
}

impl SourceKind {
    pub fn parse(raw: &str) -> SourceKind {
        if raw.trim().eq_ignore_ascii_case("pdf") {
            SourceKind::Pdf
        } else {
            SourceKind::Other
        }
    }

    pub fn is_canonical(self) -> bool {
        self == SourceKind::Pdf
    }
}

/// One row of the chunk dataset, materialized once at startup and
/// read-only afterwards.
///
/// - `document_id`/`chunk_id`: stable identifiers for citation
/// - `title`: the menu item the chunk describes (may be empty)
/// - `declared_category`: the raw category label from the dataset;
///   the catalog resolves it against [`Category`]
/// - `source_kind`: ingestion path, see [`SourceKind`]
/// - `text`: the chunk payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    pub document_id: String,
    pub chunk_id: String,
    pub title: String,
    pub declared_category: String,
    pub source_kind: SourceKind,
    pub path: String,
    pub text: String,
}

/// A scored candidate chunk produced per query; never persisted.
///
/// `score` is engine-specific but higher is always better. Rows from
/// the deterministic title path carry a fixed maximal score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRow {
    pub document_id: String,
    pub chunk_id: String,
    pub text: String,
    pub score: f32,
    pub title: Option<String>,
}

/// The minimal surface returned by the vector index: a row offset into
/// the corpus the index was built over, plus its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub id: usize,
    pub score: f32,
}
