use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("media backend error: {0}")]
    Backend(String),

    #[error("checkout failed: {0}")]
    Checkout(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
