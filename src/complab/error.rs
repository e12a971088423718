use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplabError {
    #[error("Component not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported import kind: {0}")]
    UnsupportedKind(String),

    #[error("Invalid component: {0}")]
    Invalid(String),

    #[error("A component with id '{0}' already exists")]
    IdCollision(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ComplabError>;
