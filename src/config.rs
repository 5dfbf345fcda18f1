use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE kind: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the model server. `None` leaves both models unavailable.
    pub base_url: Option<String>,
    pub generator_model: String,
    pub summarizer_model: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub inference: InferenceConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store = match std::env::var("STORE") {
            Ok(v) => v.parse()?,
            Err(_) => StoreKind::Postgres,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if store == StoreKind::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when STORE=postgres");
        }

        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };

        let inference = InferenceConfig {
            base_url: std::env::var("INFERENCE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
            generator_model: std::env::var("GENERATOR_MODEL")
                .unwrap_or_else(|_| "distilgpt2".into()),
            summarizer_model: std::env::var("SUMMARIZER_MODEL")
                .unwrap_or_else(|_| "sshleifer/distilbart-cnn-12-6".into()),
            api_token: std::env::var("INFERENCE_API_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            timeout_secs: std::env::var("INFERENCE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
        };

        Ok(Self {
            store,
            database_url,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            inference,
        })
    }

    /// In-memory store, no model server.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            store: StoreKind::Memory,
            database_url: None,
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            inference: InferenceConfig {
                base_url: None,
                generator_model: "distilgpt2".into(),
                summarizer_model: "sshleifer/distilbart-cnn-12-6".into(),
                api_token: None,
                timeout_secs: 5,
            },
        }
    }
}
