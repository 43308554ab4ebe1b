//! Tiered rule-based intent classification.
//!
//! A priority-ordered set of mutually exclusive predicates, evaluated
//! top to bottom, first match wins. Nothing matching means the query
//! goes through hybrid retrieval.

use menubot_core::normalize::normalize;
use menubot_core::types::Category;

/// What the question is asking for. Deterministic intents are answered
/// straight from the catalog/clock/state so listings are complete and
/// exactly reproducible, never paraphrased by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Date/time/last-question housekeeping; no retrieval at all.
    Meta(MetaQuestion),
    /// "list the dishes in category X".
    ListCategoryItems(Category),
    /// "which category is this dish in".
    DishCategory,
    /// "what are the categories".
    ListCategories,
    /// "show me the whole menu".
    ListAllItems,
    /// Everything else: hybrid retrieval plus generation.
    OpenEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaQuestion {
    Date,
    Time,
    LastQuestion,
}

pub fn classify(query: &str) -> Intent {
    if let Some(meta) = meta_question(query) {
        return Intent::Meta(meta);
    }
    if let Some(category) = category_listing(query) {
        return Intent::ListCategoryItems(category);
    }
    if is_dish_category(query) {
        return Intent::DishCategory;
    }
    if is_categories_listing(query) {
        return Intent::ListCategories;
    }
    if is_full_menu(query) {
        return Intent::ListAllItems;
    }
    Intent::OpenEnded
}

pub fn meta_question(query: &str) -> Option<MetaQuestion> {
    let q = normalize(query);
    if contains_any(&q, &["que dia e hoje", "data de hoje"]) {
        return Some(MetaQuestion::Date);
    }
    if q.contains("que horas sao") {
        return Some(MetaQuestion::Time);
    }
    if q.contains("ultima pergunta") {
        return Some(MetaQuestion::LastQuestion);
    }
    None
}

/// Requires both a listing trigger and a resolvable category keyword.
pub fn category_listing(query: &str) -> Option<Category> {
    let q = normalize(query);
    let triggered = contains_any(
        &q,
        &[
            "liste",
            "listar",
            "quais pratos",
            "quais itens",
            "itens da categoria",
            "pratos da categoria",
            "menu da categoria",
        ],
    );
    if !triggered {
        return None;
    }
    Category::from_label(&q)
}

/// "which category is dish X in". Checked before the generic
/// categories listing so it takes precedence when both could match.
pub fn is_dish_category(query: &str) -> bool {
    let q = normalize(query);
    q.contains("categoria")
        && contains_any(
            &q,
            &[
                "qual a categoria",
                "qual e a categoria",
                "qual categoria",
                "em qual categoria",
                "categoria do prato",
                "categoria da receita",
                "esse prato e de qual categoria",
                "essa receita e de qual categoria",
            ],
        )
}

/// "what are the categories". Explicitly excluded when the question is
/// about one dish's category; the mutual exclusion is enforced here,
/// not left to evaluation order.
pub fn is_categories_listing(query: &str) -> bool {
    if is_dish_category(query) {
        return false;
    }
    let q = normalize(query);
    contains_any(
        &q,
        &[
            "quantas categorias",
            "liste as categorias",
            "listar categorias",
            "quais sao as categorias",
            "categorias do cardapio",
            "todas as categorias",
        ],
    )
}

pub fn is_full_menu(query: &str) -> bool {
    let q = normalize(query);
    contains_any(
        &q,
        &[
            "itens do cardapio",
            "quais os itens do cardapio",
            "listar cardapio",
            "me mostre o cardapio",
            "cardapio completo",
            "todas as opcoes",
            "todas as comidas",
            "todas as receitas",
            "menu completo",
            "menu inteiro",
        ],
    )
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}
