//! Ephemeral in-memory semantic index over policy chunks plus top-k
//! retrieval. One index per document run; nothing is ever persisted or
//! shared across documents.

pub mod index;
pub mod retrieve;

pub use index::VectorIndex;
pub use retrieve::{retrieve, RetrievalResult, CONTEXT_DELIMITER};
