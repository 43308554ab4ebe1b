//! Menu dataset loading and the read-only catalog built from it.

pub mod catalog;
pub mod loader;

pub use catalog::{CatalogRow, MenuCatalog, TitleEntry};
pub use loader::load_chunks;
