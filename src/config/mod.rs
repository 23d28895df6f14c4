// src/config/mod.rs

use anyhow::{Result, anyhow};
use std::str::FromStr;

/// Runtime configuration, loaded once at startup and passed explicitly to
/// whatever needs it. No module-level globals.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    // ── Groq Configuration
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub model: String,

    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Logging Configuration
    pub log_level: String,
}

/// Reads an env var and parses it, falling back to the default when the
/// variable is missing or unparseable. Values may carry trailing comments
/// copied out of a .env file; those are stripped before parsing.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        // Load from .env file first if it exists
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow!("GROQ_API_KEY not set"))?;

        Ok(Self {
            groq_api_key,
            groq_base_url: env_var_or(
                "GROQ_BASE_URL",
                "https://api.groq.com/openai/v1".to_string(),
            ),
            model: env_var_or("SENTIMAIL_MODEL", "llama3-8b-8192".to_string()),
            host: env_var_or("SENTIMAIL_HOST", "0.0.0.0".to_string()),
            port: env_var_or("SENTIMAIL_PORT", 5000),
            log_level: env_var_or("SENTIMAIL_LOG_LEVEL", "info".to_string()),
        })
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get full Groq API URL for a given endpoint
    pub fn groq_api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.groq_base_url.trim_end_matches('/'), endpoint)
    }
}
