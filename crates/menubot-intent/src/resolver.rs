//! Dish resolution: find which menu item a question refers to, given
//! the question text and the previously discussed dish.

use menubot_catalog::MenuCatalog;
use menubot_core::normalize::normalize;
use std::collections::BTreeSet;

/// Phrases that read like a follow-up about an implicit dish:
/// ingredients, preparation, price, prep time, dietary restrictions.
const FOLLOWUP_TRIGGERS: &[&str] = &[
    "ingredientes",
    "modo de preparo",
    "como prepara",
    "preparo",
    "preço",
    "preco",
    "quanto custa",
    "tempo de preparo",
    "quanto tempo",
    "tem lactose",
    "tem glúten",
    "tem gluten",
    "restrições",
    "restricoes",
];

/// Outcome of matching a question against the menu titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishResolution {
    /// A title was found in the question itself.
    Resolved { title: String },
    /// No title in the question, but it reads like a follow-up about
    /// the previously discussed dish; the caller should rewrite the
    /// query with that dish as its subject.
    FollowUp,
    /// Neither a title nor a follow-up.
    None,
}

pub fn resolve_dish(
    catalog: &MenuCatalog,
    query: &str,
    prior_dish: Option<&str>,
) -> DishResolution {
    if let Some(title) = find_dish(catalog, query) {
        return DishResolution::Resolved { title };
    }
    if prior_dish.is_some() && is_followup(query) {
        return DishResolution::FollowUp;
    }
    DishResolution::None
}

/// Two-tier title matching over the normalized query.
///
/// Tier 1 scans candidate titles longest-first and returns the first
/// whose normalized form is a substring of the query, so multi-word
/// titles beat the short ones they contain. Tier 2 falls back to token
/// overlap, requiring at least two shared tokens; ties keep the
/// first-encountered candidate in index order.
pub fn find_dish(catalog: &MenuCatalog, query: &str) -> Option<String> {
    let qn = normalize(query);
    if qn.is_empty() {
        return None;
    }

    let mut keys: Vec<&String> = catalog.titles().keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    for key in keys {
        if !key.is_empty() && qn.contains(key.as_str()) {
            return catalog.titles().get(key).map(|e| e.title.clone());
        }
    }

    let query_tokens: BTreeSet<&str> = qn.split_whitespace().collect();
    let mut best: Option<&str> = None;
    let mut best_overlap = 0usize;
    for (key, entry) in catalog.titles() {
        let overlap = key
            .split_whitespace()
            .filter(|t| query_tokens.contains(t))
            .count();
        if overlap >= 2 && overlap > best_overlap {
            best = Some(&entry.title);
            best_overlap = overlap;
        }
    }
    best.map(str::to_string)
}

/// Does the question ask about ingredients/preparation/price/etc.
/// without naming any dish? (The no-dish check is the caller's.)
pub fn is_followup(query: &str) -> bool {
    let q = query.to_lowercase();
    FOLLOWUP_TRIGGERS.iter().any(|t| q.contains(t))
}

/// Recover the implicit subject of a follow-up by prefixing the prior
/// dish before any retrieval step.
pub fn rewrite_followup(dish: &str, query: &str) -> String {
    format!("Sobre o prato {dish}: {query}")
}
