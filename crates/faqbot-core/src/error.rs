use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("catalog must contain at least one entry")]
    EmptyCatalog,

    #[error("catalog questions produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog load failed: {0}")]
    Catalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
