//! Offline embedding and in-memory nearest-neighbor search.

pub mod embed;
pub mod index;

pub use embed::HashEmbedder;
pub use index::FlatIpIndex;
