use polaudit_core::error::{Error, Result};
use polaudit_core::traits::{Embedder, VectorSearcher};
use polaudit_core::types::ScoredChunk;

/// Separator placed between chunks in the assembled context string.
pub const CONTEXT_DELIMITER: &str = "\n---\n";

/// Chunks most similar to one query, in descending score order.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    pub hits: Vec<ScoredChunk>,
}

impl RetrievalResult {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Concatenate the retrieved chunk texts, best match first. This is
    /// the only output handed to prompt construction.
    pub fn context(&self) -> String {
        self.hits
            .iter()
            .map(|h| h.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER)
    }
}

/// Top-k retrieval. The query is embedded with the same embedder that
/// built the index; an index smaller than k returns everything it has.
pub fn retrieve(
    index: &dyn VectorSearcher,
    embedder: &dyn Embedder,
    query: &str,
    k: usize,
) -> Result<RetrievalResult> {
    let mut vectors = embedder
        .embed_batch(std::slice::from_ref(&query.to_string()))
        .map_err(|e| Error::Embedding(e.to_string()))?;
    if vectors.is_empty() {
        return Err(Error::Embedding("embedder returned no query vector".to_string()));
    }
    let query_vec = vectors.remove(0);

    let hits = index.query(&query_vec, k);
    tracing::debug!(query, k, hits = hits.len(), "retrieval complete");
    Ok(RetrievalResult { hits })
}
