use menubot_catalog::MenuCatalog;
use menubot_core::types::{Category, MenuEntry, SourceKind};
use menubot_intent::{
    classify, find_dish, is_followup, resolve_dish, rewrite_followup, DishResolution, Intent,
    MetaQuestion,
};

fn dish(doc: &str, title: &str, category: &str) -> MenuEntry {
    MenuEntry {
        document_id: doc.to_string(),
        chunk_id: "0".to_string(),
        title: title.to_string(),
        declared_category: category.to_string(),
        source_kind: SourceKind::Pdf,
        path: String::new(),
        text: format!("{title} descrição."),
    }
}

fn fixture() -> MenuCatalog {
    MenuCatalog::build(vec![
        dish("d1", "Salada Caesar", "salada"),
        dish("d2", "Salada Caesar com Frango", "salada"),
        dish("d3", "Feijoada", "tradicional"),
        dish("d4", "Pudim de Leite", "sobremesa"),
    ])
}

#[test]
fn substring_tier_prefers_longest_title() {
    let catalog = fixture();
    // Both titles are substrings of the question; the longer wins.
    assert_eq!(
        find_dish(&catalog, "ingredientes da salada caesar com frango, por favor"),
        Some("Salada Caesar com Frango".to_string())
    );
    assert_eq!(
        find_dish(&catalog, "qual o preço da Salada Caesar?"),
        Some("Salada Caesar".to_string())
    );
}

#[test]
fn substring_tier_beats_token_overlap() {
    let catalog = fixture();
    // "pudim de leite" appears verbatim; the extra "salada"/"caesar"
    // tokens must not pull the overlap tier ahead of it.
    assert_eq!(
        find_dish(&catalog, "o pudim de leite combina com salada caesar servida fria?"),
        Some("Pudim de Leite".to_string())
    );
}

#[test]
fn token_overlap_requires_two_shared_tokens() {
    let catalog = fixture();
    assert_eq!(
        find_dish(&catalog, "a caesar de frango esta boa?"),
        Some("Salada Caesar com Frango".to_string())
    );
    // One shared token is not enough.
    assert_eq!(find_dish(&catalog, "tem frango no menu?"), None);
}

#[test]
fn dish_matching_is_accent_insensitive() {
    let catalog = fixture();
    assert_eq!(
        find_dish(&catalog, "FEIJOADA tem glúten?"),
        Some("Feijoada".to_string())
    );
}

#[test]
fn followup_requires_prior_dish() {
    let catalog = fixture();
    assert!(is_followup("qual o preço?"));
    assert_eq!(
        resolve_dish(&catalog, "qual o preço?", Some("Feijoada")),
        DishResolution::FollowUp
    );
    assert_eq!(
        resolve_dish(&catalog, "qual o preço?", None),
        DishResolution::None
    );
}

#[test]
fn explicit_dish_wins_over_followup() {
    let catalog = fixture();
    assert_eq!(
        resolve_dish(&catalog, "quais os ingredientes da feijoada?", Some("Pudim de Leite")),
        DishResolution::Resolved { title: "Feijoada".to_string() }
    );
}

#[test]
fn followup_rewrite_prefixes_prior_dish() {
    assert_eq!(
        rewrite_followup("Salada Caesar", "qual o preço?"),
        "Sobre o prato Salada Caesar: qual o preço?"
    );
}

#[test]
fn meta_questions_are_detected() {
    assert_eq!(classify("Que dia é hoje?"), Intent::Meta(MetaQuestion::Date));
    assert_eq!(classify("que horas são?"), Intent::Meta(MetaQuestion::Time));
    assert_eq!(
        classify("qual foi minha última pergunta?"),
        Intent::Meta(MetaQuestion::LastQuestion)
    );
}

#[test]
fn category_listing_needs_trigger_and_category() {
    assert_eq!(
        classify("liste os pratos da categoria salada"),
        Intent::ListCategoryItems(Category::Salada)
    );
    assert_eq!(
        classify("quais pratos tradicionais vocês têm?"),
        Intent::ListCategoryItems(Category::Tradicional)
    );
    // Trigger without category keyword: open-ended.
    assert_eq!(classify("liste os pratos mais pedidos"), Intent::OpenEnded);
    // Category keyword without trigger: open-ended.
    assert_eq!(classify("a salada vem com molho?"), Intent::OpenEnded);
}

#[test]
fn dish_category_takes_precedence_over_categories_listing() {
    // Matches both the dish-category templates and a categories trigger.
    let q = "em qual categoria do cardápio fica a feijoada? liste as categorias se precisar";
    assert_eq!(classify(q), Intent::DishCategory);
    assert!(menubot_intent::intent::is_dish_category(q));
    assert!(!menubot_intent::intent::is_categories_listing(q));
}

#[test]
fn categories_listing_variants() {
    assert_eq!(classify("quais são as categorias?"), Intent::ListCategories);
    assert_eq!(classify("quantas categorias existem?"), Intent::ListCategories);
    assert_eq!(classify("categorias do cardápio"), Intent::ListCategories);
}

#[test]
fn full_menu_variants() {
    assert_eq!(classify("me mostre o cardápio"), Intent::ListAllItems);
    assert_eq!(classify("menu completo, por favor"), Intent::ListAllItems);
    assert_eq!(classify("quero ver todas as opções"), Intent::ListAllItems);
}

#[test]
fn default_is_open_ended() {
    assert_eq!(classify("a feijoada é apimentada?"), Intent::OpenEnded);
    assert_eq!(classify(""), Intent::OpenEnded);
}
