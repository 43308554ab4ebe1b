//! The answer orchestrator: meta check, dish resolution, intent
//! routing, and the retrieval + generation path, followed by the
//! state update.

use crate::context::{assemble, DEFAULT_MAX_CHARS};
use crate::retrieve::HybridRetriever;
use crate::state::ConversationState;
use chrono::Local;
use menubot_catalog::MenuCatalog;
use menubot_core::traits::Generator;
use menubot_core::types::Category;
use menubot_intent::{
    classify, find_dish, resolve_dish, rewrite_followup, DishResolution, Intent, MetaQuestion,
};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "Você é um assistente virtual de um restaurante. \
    Responda de forma clara, educada e objetiva. \
    Use apenas as informações do CONTEXTO fornecido. \
    Se a resposta não estiver na base, diga isso explicitamente. \
    Ao final, liste as fontes utilizadas.";

const APOLOGY: &str =
    "Desculpe, não consegui gerar a resposta agora. Tente novamente em instantes.";

const NO_EVIDENCE: &str =
    "Não encontrei informações suficientes na base para responder a essa pergunta.";

const META_SOURCE: &str = "sistema (data/hora/contexto)";

/// One turn's result, handed back to the session surface together with
/// the updated state.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
    pub dish: Option<String>,
}

struct Turn {
    answer: Answer,
    /// Title resolved from the question itself this turn, if any.
    /// A reused prior dish does not count.
    resolved: Option<String>,
}

pub struct Assistant {
    catalog: Arc<MenuCatalog>,
    retriever: HybridRetriever,
    generator: Box<dyn Generator>,
    max_context_chars: usize,
}

impl Assistant {
    pub fn new(
        catalog: Arc<MenuCatalog>,
        retriever: HybridRetriever,
        generator: Box<dyn Generator>,
    ) -> Self {
        Self { catalog, retriever, generator, max_context_chars: DEFAULT_MAX_CHARS }
    }

    pub fn with_max_context_chars(mut self, max_context_chars: usize) -> Self {
        self.max_context_chars = max_context_chars;
        self
    }

    /// Process one question. The state is always updated: the current
    /// query becomes `last_user_question`, and `current_dish` changes
    /// only when a dish was resolved from the question itself.
    pub fn answer(&self, query: &str, state: &mut ConversationState) -> Answer {
        let turn = self.run_turn(query, state);
        if let Some(dish) = turn.resolved {
            state.current_dish = Some(dish);
        }
        state.last_user_question = Some(query.to_string());
        turn.answer
    }

    fn run_turn(&self, query: &str, state: &ConversationState) -> Turn {
        // Meta questions are answered from the clock/state before any
        // dish resolution or retrieval.
        if let Intent::Meta(meta) = classify(query) {
            return Turn { answer: self.meta_answer(meta, state), resolved: None };
        }

        let resolution = resolve_dish(&self.catalog, query, state.current_dish.as_deref());
        let (active_dish, mut resolved, effective_query) = match resolution {
            DishResolution::Resolved { title } => {
                (Some(title.clone()), Some(title), query.to_string())
            }
            DishResolution::FollowUp => match state.current_dish.clone() {
                Some(dish) => {
                    let rewritten = rewrite_followup(&dish, query);
                    tracing::debug!(dish = %dish, "follow-up rewritten with prior dish");
                    (Some(dish), None, rewritten)
                }
                None => (None, None, query.to_string()),
            },
            DishResolution::None => (state.current_dish.clone(), None, query.to_string()),
        };

        let answer = match classify(&effective_query) {
            Intent::Meta(meta) => self.meta_answer(meta, state),
            Intent::ListCategoryItems(category) => self.list_category_items(category),
            Intent::DishCategory => {
                let (answer, dish) = self.dish_category(&effective_query, active_dish.as_deref());
                if dish.is_some() {
                    resolved = dish;
                }
                answer
            }
            Intent::ListCategories => self.list_categories(),
            Intent::ListAllItems => self.list_all_items(),
            Intent::OpenEnded => self.open_ended(&effective_query, active_dish.as_deref()),
        };
        Turn { answer, resolved }
    }

    fn meta_answer(&self, meta: MetaQuestion, state: &ConversationState) -> Answer {
        let text = match meta {
            MetaQuestion::Date => format!("Hoje é {}.", Local::now().format("%d/%m/%Y")),
            MetaQuestion::Time => format!("Agora são {}.", Local::now().format("%H:%M")),
            MetaQuestion::LastQuestion => match &state.last_user_question {
                Some(question) => format!("Sua última pergunta foi: {question}"),
                None => "Ainda não tenho uma pergunta anterior registrada.".to_string(),
            },
        };
        Answer { text, sources: vec![META_SOURCE.to_string()], dish: None }
    }

    fn list_category_items(&self, category: Category) -> Answer {
        let titles = self.catalog.titles_in_category(category);
        let source = format!("catálogo (lista de pratos: {category})");
        let text = if titles.is_empty() {
            format!("Não encontrei pratos para a categoria **{category}** na base atual.")
        } else {
            format!(
                "Pratos da categoria **{category}**:\n- {}\n\nTotal: {} pratos.",
                titles.join("\n- "),
                titles.len()
            )
        };
        Answer { text, sources: vec![source], dish: None }
    }

    fn dish_category(
        &self,
        query: &str,
        active_dish: Option<&str>,
    ) -> (Answer, Option<String>) {
        let Some(title) = find_dish(&self.catalog, query) else {
            let answer = Answer {
                text: "Não consegui identificar o nome do prato. Digite o nome exato (como no cardápio)."
                    .to_string(),
                sources: vec!["catálogo (categoria do prato)".to_string()],
                dish: active_dish.map(str::to_string),
            };
            return (answer, None);
        };

        let text = match self.catalog.category_of(&title) {
            Some(category) => format!("O prato **{title}** fica na categoria **{category}**."),
            None => format!("O prato **{title}** está sem categoria definida na base atual."),
        };
        let answer = Answer {
            text,
            sources: vec![format!("catálogo (categoria do prato: {title})")],
            dish: Some(title.clone()),
        };
        (answer, Some(title))
    }

    /// Always the four official categories in fixed order, independent
    /// of what the dataset happens to contain.
    fn list_categories(&self) -> Answer {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        Answer {
            text: format!(
                "As categorias no cardápio são:\n- {}\n\nTotal: {} categorias.",
                names.join("\n- "),
                names.len()
            ),
            sources: vec!["catálogo (categorias oficiais)".to_string()],
            dish: None,
        }
    }

    fn list_all_items(&self) -> Answer {
        let titles = self.catalog.all_titles();
        let text = if titles.is_empty() {
            "Não encontrei itens do cardápio na base atual.".to_string()
        } else {
            format!(
                "Itens do cardápio:\n- {}\n\nTotal: {} itens.",
                titles.join("\n- "),
                titles.len()
            )
        };
        Answer {
            text,
            sources: vec!["catálogo (títulos do cardápio)".to_string()],
            dish: None,
        }
    }

    fn open_ended(&self, query: &str, dish: Option<&str>) -> Answer {
        let rows = match self.retriever.retrieve(query, dish) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "retrieval failed");
                return self.apology(dish);
            }
        };
        if rows.is_empty() {
            return Answer {
                text: NO_EVIDENCE.to_string(),
                sources: Vec::new(),
                dish: dish.map(str::to_string),
            };
        }

        let context = assemble(&rows, self.max_context_chars);
        let user_prompt = format!("PERGUNTA:\n{query}\n\nCONTEXTO:\n{context}");
        match self.generator.generate(SYSTEM_PROMPT, &user_prompt) {
            Ok(text) => Answer {
                text,
                sources: rows
                    .iter()
                    .map(|r| format!("{} (chunk {})", r.document_id, r.chunk_id))
                    .collect(),
                dish: dish.map(str::to_string),
            },
            Err(err) => {
                tracing::warn!(error = %err, "generation failed");
                self.apology(dish)
            }
        }
    }

    fn apology(&self, dish: Option<&str>) -> Answer {
        Answer {
            text: APOLOGY.to_string(),
            sources: Vec::new(),
            dish: dish.map(str::to_string),
        }
    }
}
