//! AI review client.
//!
//! A review is a structured pedagogical and privacy assessment of one catalog
//! entry, generated on demand by an OpenAI-compatible chat completion endpoint
//! in the active display language. Reviews are never cached: every detail
//! view activation asks again.

use crate::catalog::CatalogEntry;
use crate::config::Config;
use crate::i18n::Language;
use anyhow::Context;
use futures::future::BoxFuture;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info, warn};

// ==================== Review Schema ====================

/// Privacy and data-protection part of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyAnalysis {
    pub gdpr_compliant: bool,
    pub data_collected: String,
    pub age_warning: String,
    pub compliance_summary: String,
}

/// A generated review. Every field is required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReview {
    pub summary: String,
    pub teacher_tip: String,
    pub student_activity: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub privacy: PrivacyAnalysis,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("review request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("review API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("review response contained no choices")]
    EmptyResponse,

    #[error("review response does not match the review schema: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Anything that can produce a review for an entry.
///
/// The directory controller only depends on this trait, so tests and
/// alternative backends can stand in for the HTTP client.
pub trait ReviewProvider {
    fn generate<'a>(
        &'a self,
        entry: &'a CatalogEntry,
        language: Language,
    ) -> BoxFuture<'a, Result<AiReview, ReviewError>>;
}

// ==================== Chat Completion Wire Types ====================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

// ==================== Prompts ====================

fn build_system_prompt(language: Language) -> String {
    format!(
        r#"You are an expert in educational technology and European data-protection law (GDPR).
You assess educational apps for teachers in Spanish schools.

Respond ONLY with a JSON object with exactly these fields:
{{
  "summary": string,            // 2-3 sentence pedagogical overview
  "teacherTip": string,         // one practical tip for teachers
  "studentActivity": string,    // one concrete classroom activity
  "pros": [string],             // 3 strengths, most important first
  "cons": [string],             // 2-3 weaknesses, most important first
  "privacy": {{
    "gdprCompliant": boolean,
    "dataCollected": string,    // what personal data the app collects
    "ageWarning": string,       // age restrictions or parental consent notes
    "complianceSummary": string
  }}
}}

Write every text value in {} ({}). Do not add any other fields or commentary."#,
        language.name(),
        language.native_name()
    )
}

fn build_user_prompt(entry: &CatalogEntry, language: Language) -> String {
    format!(
        "App: {}\nWebsite: {}\nDescription: {}\n\nWrite the review in {}.",
        entry.name,
        entry.website,
        entry.description(language),
        language.name()
    )
}

// ==================== Response Parsing ====================

static CODE_FENCE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Parse the assistant message into a review.
///
/// Some models wrap JSON in a markdown code fence even when asked not to; the
/// fence is stripped before parsing.
pub fn parse_review(content: &str) -> Result<AiReview, ReviewError> {
    let fence = CODE_FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("code fence regex is valid")
    });

    let json = match fence.captures(content) {
        Some(cap) => cap.get(1).map_or("", |m| m.as_str()),
        None => content.trim(),
    };

    Ok(serde_json::from_str(json)?)
}

// ==================== OpenAI Client ====================

/// Review provider backed by an OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiReviewer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiReviewer {
    pub fn new(client: reqwest::Client, config: &Config) -> anyhow::Result<Self> {
        let api_key = config
            .require_openai_key()
            .context("Cannot create review client")?
            .to_string();

        Ok(Self {
            client,
            api_url: config.openai_api_url.clone(),
            api_key,
            model: config.openai_model.clone(),
            max_tokens: config.review_max_tokens,
        })
    }

    /// Generate a review for `entry` in `language`.
    pub async fn review(
        &self,
        entry: &CatalogEntry,
        language: Language,
    ) -> Result<AiReview, ReviewError> {
        info!(
            "Requesting AI review for '{}' (id {}) in {}",
            entry.name,
            entry.id,
            language.name()
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_system_prompt(language),
                },
                Message {
                    role: "user".to_string(),
                    content: build_user_prompt(entry, language),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.4,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            warn!("Review API returned {} for entry {}", status, entry.id);
            return Err(ReviewError::Api { status, body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ReviewError::EmptyResponse)?;

        debug!("Review response for entry {}: {} bytes", entry.id, content.len());
        parse_review(&content)
    }
}

impl ReviewProvider for OpenAiReviewer {
    fn generate<'a>(
        &'a self,
        entry: &'a CatalogEntry,
        language: Language,
    ) -> BoxFuture<'a, Result<AiReview, ReviewError>> {
        Box::pin(self.review(entry, language))
    }
}
