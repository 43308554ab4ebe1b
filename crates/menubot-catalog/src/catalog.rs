//! The read-only menu catalog: per-row category resolution and the
//! normalized-title index, built once at startup.

use menubot_core::normalize::normalize;
use menubot_core::types::{Category, MenuEntry};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// A dataset row with its category resolved by the labeling policy.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub entry: MenuEntry,
    pub category: Option<Category>,
}

/// What a normalized title maps back to.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleEntry {
    pub title: String,
    pub category: Option<Category>,
}

/// Immutable catalog over the chunk dataset.
///
/// The title index only covers canonical (PDF) rows, since other source
/// kinds may duplicate them with noisier text. Keys are normalized
/// titles; collisions are last-write-wins and logged as a data-quality
/// concern.
pub struct MenuCatalog {
    rows: Vec<CatalogRow>,
    titles: BTreeMap<String, TitleEntry>,
}

impl MenuCatalog {
    pub fn build(entries: Vec<MenuEntry>) -> MenuCatalog {
        let rows: Vec<CatalogRow> = entries
            .into_iter()
            .map(|entry| {
                let category = resolve_category(&entry);
                CatalogRow { entry, category }
            })
            .collect();

        let mut titles: BTreeMap<String, TitleEntry> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.entry.source_kind.is_canonical()) {
            if !is_valid_title(&row.entry.title) {
                continue;
            }
            let key = normalize(&row.entry.title);
            if key.is_empty() {
                continue;
            }
            let next = TitleEntry {
                title: row.entry.title.clone(),
                category: row.category,
            };
            if let Some(prev) = titles.insert(key.clone(), next) {
                if prev.title != row.entry.title {
                    tracing::warn!(
                        normalized = %key,
                        kept = %row.entry.title,
                        dropped = %prev.title,
                        "distinct titles collide after normalization"
                    );
                }
            }
        }

        tracing::debug!(rows = rows.len(), titles = titles.len(), "catalog built");
        MenuCatalog { rows, titles }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn canonical_rows(&self) -> impl Iterator<Item = &CatalogRow> {
        self.rows
            .iter()
            .filter(|r| r.entry.source_kind.is_canonical())
    }

    /// Normalized-title index over canonical rows.
    pub fn titles(&self) -> &BTreeMap<String, TitleEntry> {
        &self.titles
    }

    pub fn category_of(&self, title: &str) -> Option<Category> {
        self.titles.get(&normalize(title)).and_then(|t| t.category)
    }

    /// Sorted, deduplicated titles of the canonical rows in `category`.
    /// Rows whose category never resolved are excluded from listings.
    pub fn titles_in_category(&self, category: Category) -> Vec<String> {
        let set: BTreeSet<String> = self
            .canonical_rows()
            .filter(|r| r.category == Some(category))
            .filter(|r| is_valid_title(&r.entry.title))
            .map(|r| r.entry.title.clone())
            .collect();
        set.into_iter().collect()
    }

    /// Sorted, deduplicated titles of every canonical row.
    pub fn all_titles(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .canonical_rows()
            .filter(|r| is_valid_title(&r.entry.title))
            .map(|r| r.entry.title.clone())
            .collect();
        set.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Category policy: an explicit `CATEGORIA:` marker inside the chunk
/// text wins over the declared column; either label is resolved by
/// keyword stems in a fixed priority order. Rows matching nothing stay
/// unresolved and are excluded from listings.
fn resolve_category(entry: &MenuEntry) -> Option<Category> {
    if let Some(marker) = category_marker(&entry.text) {
        if let Some(category) = Category::from_label(&normalize(&marker)) {
            return Some(category);
        }
    }
    Category::from_label(&normalize(&entry.declared_category))
}

/// `CATEGORIA: <label>` (or the label on the next line), case-insensitive.
fn category_marker(text: &str) -> Option<String> {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    let re = MARKER.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"(?i)\bCATEGORIA\b\s*[:\n]\s*([^\n\r]+)").unwrap()
    });
    re.captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Upstream parsing leaves empty and literal "nan" titles behind.
fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && !title.eq_ignore_ascii_case("nan")
}
