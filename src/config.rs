use crate::i18n::Language;
use crate::icon::DEFAULT_FAVICON_SERVICE;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    /// JSON catalog to load instead of the bundled one
    pub catalog_path: Option<String>,

    // OpenAI (only needed for reviews)
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub review_max_tokens: u32,

    // Icons
    /// Favicon service template; `{domain}` is replaced by the website host
    pub favicon_service_url: String,

    // Export
    pub export_dir: String,

    // Display
    pub default_language: Language,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_language = match std::env::var("DEFAULT_LANGUAGE") {
            Ok(code) => Language::from_code(&code).context("DEFAULT_LANGUAGE is not supported")?,
            Err(_) => Language::canonical(),
        };

        Ok(Self {
            // Catalog
            catalog_path: std::env::var("CATALOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            review_max_tokens: std::env::var("REVIEW_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1500),

            // Icons
            favicon_service_url: std::env::var("FAVICON_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_FAVICON_SERVICE.to_string()),

            // Export
            export_dir: std::env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".to_string()),

            default_language,
        })
    }

    /// The OpenAI key, for commands that generate reviews.
    pub fn require_openai_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY not set (required for AI reviews)")
    }
}
