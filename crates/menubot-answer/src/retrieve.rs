//! Hybrid retrieval: deterministic title lookup first, vector
//! similarity search only when that yields nothing.

use anyhow::Result;
use menubot_catalog::{CatalogRow, MenuCatalog};
use menubot_core::normalize::normalize;
use menubot_core::traits::{Embedder, VectorIndex};
use menubot_core::types::EvidenceRow;
use std::collections::HashSet;
use std::sync::Arc;

/// Rows from the title path are trusted unconditionally and bypass the
/// relevance threshold.
const TITLE_MATCH_SCORE: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Candidates requested from the vector index.
    pub top_k: usize,
    /// Minimum cosine similarity a semantic candidate must reach.
    pub min_score: f32,
    /// Final cap after per-document deduplication.
    pub max_rows: usize,
    /// Cap on rows taken from the deterministic title path.
    pub title_rows: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 10, min_score: 0.28, max_rows: 5, title_rows: 8 }
    }
}

pub struct HybridRetriever {
    catalog: Arc<MenuCatalog>,
    embedder: Box<dyn Embedder>,
    index: Box<dyn VectorIndex>,
    config: RetrievalConfig,
}

impl HybridRetriever {
    /// Embed every catalog row and fill the index. Runs once at
    /// startup; an index that cannot be built is a fatal error, not a
    /// degraded session.
    pub fn build(
        catalog: Arc<MenuCatalog>,
        embedder: Box<dyn Embedder>,
        mut index: Box<dyn VectorIndex>,
        config: RetrievalConfig,
    ) -> Result<Self> {
        let texts: Vec<String> = catalog.rows().iter().map(|r| r.entry.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts)?;
        index.add(&embeddings)?;
        tracing::debug!(vectors = index.len(), "vector index built");
        Ok(Self { catalog, embedder, index, config })
    }

    /// At most `max_rows` evidence rows, one per source document,
    /// ordered by descending score. Empty output is a valid terminal
    /// outcome, not an error.
    pub fn retrieve(&self, query: &str, dish: Option<&str>) -> Result<Vec<EvidenceRow>> {
        let mut rows = match dish {
            Some(dish) => self.by_title(dish),
            None => Vec::new(),
        };
        if rows.is_empty() {
            rows = self.semantic(query, dish)?;
        }
        Ok(finalize(rows, self.config.max_rows))
    }

    /// Deterministic path: canonical rows whose normalized title equals
    /// the dish name, falling back to "contains" matching.
    fn by_title(&self, dish: &str) -> Vec<EvidenceRow> {
        let dish_norm = normalize(dish);
        if dish_norm.is_empty() {
            return Vec::new();
        }
        let canonical: Vec<&CatalogRow> = self.catalog.canonical_rows().collect();
        let mut hits: Vec<&CatalogRow> = canonical
            .iter()
            .filter(|r| normalize(&r.entry.title) == dish_norm)
            .copied()
            .collect();
        if hits.is_empty() {
            hits = canonical
                .iter()
                .filter(|r| normalize(&r.entry.title).contains(&dish_norm))
                .copied()
                .collect();
        }
        hits.into_iter()
            .take(self.config.title_rows)
            .map(|r| evidence(r, TITLE_MATCH_SCORE))
            .collect()
    }

    /// Semantic path: embed, nearest-neighbor search, threshold, and —
    /// when a dish is known and any surviving candidate mentions it —
    /// narrow to those candidates.
    fn semantic(&self, query: &str, dish: Option<&str>) -> Result<Vec<EvidenceRow>> {
        let query_vec = self.embedder.embed(query)?;
        let hits = self.index.search(&query_vec, self.config.top_k)?;

        let mut rows: Vec<EvidenceRow> = hits
            .into_iter()
            .filter(|h| h.score >= self.config.min_score)
            .filter_map(|h| self.catalog.rows().get(h.id).map(|r| evidence(r, h.score)))
            .collect();

        if let Some(dish) = dish {
            let dish_lower = dish.to_lowercase();
            let focused: Vec<EvidenceRow> = rows
                .iter()
                .filter(|r| {
                    r.title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&dish_lower))
                })
                .cloned()
                .collect();
            if !focused.is_empty() {
                rows = focused;
            }
        }
        Ok(rows)
    }
}

fn evidence(row: &CatalogRow, score: f32) -> EvidenceRow {
    EvidenceRow {
        document_id: row.entry.document_id.clone(),
        chunk_id: row.entry.chunk_id.clone(),
        text: row.entry.text.clone(),
        score,
        title: (!row.entry.title.is_empty()).then(|| row.entry.title.clone()),
    }
}

/// Sort by score descending, keep the first row per source document,
/// truncate to the cap.
fn finalize(mut rows: Vec<EvidenceRow>, cap: usize) -> Vec<EvidenceRow> {
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    let mut seen: HashSet<String> = HashSet::new();
    rows.retain(|r| seen.insert(r.document_id.clone()));
    rows.truncate(cap);
    rows
}
