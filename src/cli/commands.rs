use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Flags override the matching `MEMORY_API_*` environment variables.
#[derive(Parser)]
#[command(name = "memory-api", about = "Memory store with semantic related-memory search")]
pub struct Cli {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Location of the persisted index artifact
    #[arg(long)]
    pub index_path: Option<PathBuf>,
    /// Embedding provider (hashing, openai, voyage, disabled)
    #[arg(long)]
    pub embedding_provider: Option<String>,
}

impl Cli {
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.index_path {
            config.index_path = path;
        }
        if let Some(provider) = self.embedding_provider {
            config.embedding_provider = provider;
        }
        config
    }
}
