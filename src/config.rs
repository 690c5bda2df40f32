use crate::domain::error::DomainError;
use std::path::PathBuf;

pub const DEFAULT_INDEX_PATH: &str = "memories.leann";
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub index_path: PathBuf,
    /// `hashing`, `openai`, `voyage` or `disabled`.
    pub embedding_provider: String,
    pub embedding_model: Option<String>,
    pub embedding_api_key: String,
    pub embedding_base_url: Option<String>,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            embedding_provider: "hashing".into(),
            embedding_model: None,
            embedding_api_key: String::new(),
            embedding_base_url: None,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();

        let port = match std::env::var("MEMORY_API_PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| DomainError::Config(format!("MEMORY_API_PORT is not a port: {p}")))?,
            Err(_) => defaults.port,
        };

        let cors_origins = std::env::var("MEMORY_API_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Ok(Self {
            host: std::env::var("MEMORY_API_HOST").unwrap_or(defaults.host),
            port,
            index_path: std::env::var("MEMORY_API_INDEX_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_path),
            embedding_provider: std::env::var("MEMORY_API_EMBEDDING_PROVIDER")
                .unwrap_or(defaults.embedding_provider),
            embedding_model: std::env::var("MEMORY_API_EMBEDDING_MODEL").ok(),
            embedding_api_key: std::env::var("MEMORY_API_EMBEDDING_API_KEY").unwrap_or_default(),
            embedding_base_url: std::env::var("MEMORY_API_EMBEDDING_BASE_URL").ok(),
            cors_origins,
        })
    }
}
