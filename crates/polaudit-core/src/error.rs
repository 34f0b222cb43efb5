use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Document produced no chunkable text")]
    EmptyDocument,

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
