use crate::error::GenerationError;
use crate::types::SearchHit;

/// Produces fixed-length unit vectors, so inner product over them is
/// cosine similarity. Batched for index construction, single-item for
/// query time.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut vectors = self.embed_batch(std::slice::from_ref(&text.to_string()))?;
        if vectors.is_empty() {
            anyhow::bail!("embedder returned no vector for single-item batch");
        }
        Ok(vectors.remove(0))
    }
}

/// Nearest-neighbor index over row offsets; results are ordered by
/// descending similarity.
pub trait VectorIndex: Send + Sync {
    fn add(&mut self, vectors: &[Vec<f32>]) -> anyhow::Result<()>;
    fn search(&self, query: &[f32], k: usize) -> anyhow::Result<Vec<SearchHit>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The text-generation collaborator. Synchronous and potentially slow;
/// failures come back as typed [`GenerationError`] values rather than
/// being caught somewhere up the stack.
pub trait Generator: Send + Sync {
    fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}
