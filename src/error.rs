use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicksError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Duplicate item key in catalog: {0}")]
    DuplicateItem(String),

    #[error("Selection incomplete: {assigned} of {required} categories assigned")]
    Incomplete { assigned: usize, required: usize },

    #[error("Catalog not loaded")]
    NotReady,
}

pub type Result<T> = std::result::Result<T, PicksError>;
