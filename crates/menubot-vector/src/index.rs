//! Brute-force inner-product index over unit vectors.
//!
//! The corpus is a few hundred chunks, so a flat scan beats any
//! approximate structure. Hit ids are row offsets in insertion order.

use anyhow::Result;
use menubot_core::traits::VectorIndex;
use menubot_core::types::SearchHit;

pub struct FlatIpIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIpIndex {
    pub fn new(dim: usize) -> Self {
        Self { dim, vectors: Vec::new() }
    }
}

impl VectorIndex for FlatIpIndex {
    fn add(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        for v in vectors {
            if v.len() != self.dim {
                anyhow::bail!(
                    "vector dimension {} does not match index dimension {}",
                    v.len(),
                    self.dim
                );
            }
        }
        self.vectors.extend(vectors.iter().cloned());
        Ok(())
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dim {
            anyhow::bail!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dim
            );
        }
        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, v)| SearchHit {
                id,
                score: v.iter().zip(query).map(|(a, b)| a * b).sum(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
