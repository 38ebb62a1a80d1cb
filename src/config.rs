//! Configuration resolution
//!
//! One `Config` value object built from the environment at process start and
//! handed to the components that need it. Nothing reads ambient state after
//! startup.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// LLM_PROVIDER was set to something other than "ollama" or "openai"
    #[error("Unknown LLM provider: {0} (expected \"ollama\" or \"openai\")")]
    UnknownProvider(String),
}

/// Which classification backend to construct at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAi,
}

impl Provider {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Input table read at the start of every classification cycle
    pub input_csv_path: PathBuf,
    /// Directory created (if needed) before export
    pub output_dir: PathBuf,
    /// Export target, overwritten on every cycle
    pub output_csv_path: PathBuf,
    /// SQLite database file
    pub sqlite_path: PathBuf,
    /// Classification backend selector
    pub llm_provider: Provider,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub openai_base_url: String,
    /// Required only when `llm_provider` is `openai`
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// HTTP listen address
    pub listen_addr: String,
}

impl Config {
    /// Build configuration from environment variables, with defaults for
    /// everything except the OpenAI credential
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider_raw = env_or("LLM_PROVIDER", "ollama");

        Ok(Self {
            input_csv_path: PathBuf::from(env_or("INPUT_CSV_PATH", "licenses.csv")),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "output")),
            output_csv_path: PathBuf::from(env_or("OUTPUT_CSV_PATH", "output/output.csv")),
            sqlite_path: PathBuf::from(env_or("SQLITE_PATH", "licenses.db")),
            llm_provider: Provider::parse(&provider_raw)?,
            ollama_base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama3.1:8b"),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            listen_addr: env_or("LISTEN_ADDR", "127.0.0.1:8730"),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
