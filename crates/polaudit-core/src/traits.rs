use crate::types::ScoredChunk;

/// Text -> fixed-length vector. The same embedder instance must serve
/// both index build and query time; mixing embedding spaces invalidates
/// similarity scores.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Nearest-neighbor search over embedded chunks.
pub trait VectorSearcher: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-k by descending similarity, ties broken by ascending
    /// chunk_index. Returns fewer than k entries when the index is small.
    fn query(&self, query_vec: &[f32], k: usize) -> Vec<ScoredChunk>;
}

/// The external completion service. Treated as an opaque, unreliable
/// collaborator: the returned text may be malformed JSON or contain
/// ungrounded content, which downstream parsing and validation handle.
pub trait Generator: Send + Sync {
    fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
