use anyhow::{Context, Result};

use crate::cloud::FontFamily;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the caption backend. `None` runs against the in-process store.
    pub backend_url: Option<String>,
    pub backend_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub cloud_font: FontFamily,
    pub extra_stopwords: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL").filter(|v| !v.trim().is_empty());
        let backend_api_key = match backend_url {
            Some(_) => Some(
                lookup("BACKEND_API_KEY")
                    .filter(|v| !v.trim().is_empty())
                    .context("BACKEND_API_KEY must be set when BACKEND_URL is set")?,
            ),
            None => None,
        };

        Ok(Config {
            backend_url,
            backend_api_key,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            cloud_font: match lookup("CLOUD_FONT") {
                Some(raw) => raw
                    .parse::<FontFamily>()
                    .map_err(anyhow::Error::msg)
                    .context("CLOUD_FONT is invalid")?,
                None => FontFamily::default(),
            },
            extra_stopwords: lookup("CLOUD_EXTRA_STOPWORDS")
                .map(|raw| {
                    raw.split(',')
                        .map(|w| w.trim().to_lowercase())
                        .filter(|w| !w.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
