//! The answer pipeline: hybrid retrieval, context assembly,
//! conversation state, and the orchestrator that sequences them.

pub mod context;
pub mod orchestrate;
pub mod retrieve;
pub mod state;

pub use context::assemble;
pub use orchestrate::{Answer, Assistant};
pub use retrieve::{HybridRetriever, RetrievalConfig};
pub use state::ConversationState;
