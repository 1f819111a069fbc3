use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

pub const MEMORY_STORE: &str = ":memory:";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_url: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_timeout: Duration,
    /// When set, roadmap generation goes through this relay instead of the
    /// provider directly.
    pub relay_url: Option<String>,
    /// JSON file backing the account store, or `:memory:`.
    pub store_path: String,
    pub bind_addr: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_api_key = non_empty("LLM_API_KEY");
        let relay_url = non_empty("RELAY_URL");
        if llm_api_key.is_none() && relay_url.is_none() {
            bail!("Required environment variable 'LLM_API_KEY' is not set (or set RELAY_URL)");
        }

        let timeout_secs = non_empty("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "120".to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            llm_api_url: non_empty("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            llm_api_key,
            llm_model: non_empty("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(timeout_secs),
            relay_url,
            store_path: non_empty("STORE_PATH")
                .unwrap_or_else(|| "planify_store.json".to_string()),
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_api_key_only() {
        let cfg = config(&[("LLM_API_KEY", "sk-test")]).unwrap();
        assert_eq!(cfg.llm_api_url, DEFAULT_API_URL);
        assert_eq!(cfg.llm_model, DEFAULT_MODEL);
        assert_eq!(cfg.llm_timeout, Duration::from_secs(120));
        assert_eq!(cfg.store_path, "planify_store.json");
        assert_eq!(cfg.bind_addr, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.relay_url.is_none());
    }

    #[test]
    fn test_relay_url_replaces_api_key() {
        let cfg = config(&[("RELAY_URL", "http://localhost:3001/api/chat")]).unwrap();
        assert!(cfg.llm_api_key.is_none());
        assert_eq!(cfg.relay_url.as_deref(), Some("http://localhost:3001/api/chat"));
    }

    #[test]
    fn test_missing_key_and_relay_is_an_error() {
        let err = config(&[("LLM_API_KEY", "  ")]).unwrap_err();
        assert!(err.to_string().contains("LLM_API_KEY"));
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = config(&[("LLM_API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let cfg = config(&[
            ("LLM_API_KEY", "k"),
            ("LLM_MODEL", "mixtral-8x7b-32768"),
            ("LLM_TIMEOUT_SECS", "30"),
            ("STORE_PATH", MEMORY_STORE),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(cfg.llm_model, "mixtral-8x7b-32768");
        assert_eq!(cfg.llm_timeout, Duration::from_secs(30));
        assert_eq!(cfg.store_path, MEMORY_STORE);
        assert_eq!(cfg.port, 9000);
    }
}
