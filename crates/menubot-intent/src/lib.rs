//! Query understanding: which dish a question refers to, and which
//! intent it carries. Keyword heuristics only — fast, deterministic,
//! no model involved.

pub mod intent;
pub mod resolver;

pub use intent::{classify, Intent, MetaQuestion};
pub use resolver::{find_dish, is_followup, resolve_dish, rewrite_followup, DishResolution};
