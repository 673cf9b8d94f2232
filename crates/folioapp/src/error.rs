use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Field '{field}' not found in form '{form}'")]
    FieldNotFound { form: String, field: String },

    #[error("Unreadable draft for '{key}': {reason}")]
    DraftDecode { key: String, reason: String },

    #[error("Could not persist '{key}': {reason}")]
    PersistenceWrite { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
