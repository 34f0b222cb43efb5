use indicatif::{ProgressBar, ProgressStyle};

use polaudit_core::error::{Error, Result};
use polaudit_core::traits::{Embedder, VectorSearcher};
use polaudit_core::types::{Chunk, ScoredChunk};

struct IndexEntry {
    vector: Vec<f32>,
    chunk: Chunk,
}

/// Exact nearest-neighbor index over embedded chunks. Brute-force cosine
/// is enough at this scale (tens to low hundreds of chunks per document).
pub struct VectorIndex {
    dim: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn new(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Add one embedded chunk. Vectors of the wrong width would silently
    /// corrupt similarity scores, so they are rejected here.
    pub fn add(&mut self, vector: Vec<f32>, chunk: Chunk) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::Embedding(format!(
                "vector width {} does not match index dim {}",
                vector.len(),
                self.dim
            )));
        }
        self.entries.push(IndexEntry { vector, chunk });
        Ok(())
    }

    /// Embed every chunk and build a fresh index. Fails with
    /// `EmptyDocument` when the document produced no chunks.
    pub fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        if chunks.is_empty() {
            return Err(Error::EmptyDocument);
        }
        tracing::info!(chunks = chunks.len(), "building vector index");

        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks embedded")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut index = Self::new(embedder.dim());
        for chunk in chunks {
            let vector = embedder
                .embed_batch(std::slice::from_ref(&chunk.content))
                .map_err(|e| Error::Embedding(e.to_string()))?
                .remove(0);
            index.add(vector, chunk)?;
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(index)
    }
}

impl VectorSearcher for VectorIndex {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn query(&self, query_vec: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                score: cosine_similarity(query_vec, &entry.vector),
                chunk: entry.chunk.clone(),
            })
            .collect();
        // Descending score; equal scores keep original sequence order so
        // retrieval stays deterministic.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.chunk.chunk_index.cmp(&b.chunk.chunk_index))
        });
        scored.truncate(k);
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
