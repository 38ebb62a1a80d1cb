//! License classification provider
//!
//! Two interchangeable backends (local Ollama endpoint, remote OpenAI-style
//! API) behind one closed variant. The prompt, the strict-JSON parse, and the
//! label fallback are shared; a backend contributes nothing but transport.

use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, Provider};
use crate::db::models::{truncate_explanation, Typology};

pub mod ollama;
pub mod openai;

pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;

/// Explanation stored when the model returns an invalid label and no usable rationale
pub const FALLBACK_EXPLANATION: &str = "Fallback classification due to invalid model output.";

/// System prompt shared by both backends
const SYSTEM_PROMPT: &str = "You classify software license names into exactly one typology: \
    Productivity, Design, Communication, Development, Finance, Marketing. \
    Return strict JSON only.";

/// Classification provider errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Network/HTTP-level failure reaching the backend
    #[error("Provider transport error: {0}")]
    Transport(String),

    /// Backend replied with a non-success HTTP status
    #[error("Provider API error {0}: {1}")]
    Api(u16, String),

    /// Backend replied but the payload is not the expected JSON shape
    #[error("Provider returned malformed output: {0}")]
    Schema(String),

    /// Remote provider selected without a credential
    #[error("OPENAI_API_KEY is required when LLM_PROVIDER=openai")]
    MissingCredential,
}

/// A schema-valid classification result
///
/// Guaranteed by construction: the typology is a member of the closed label
/// set and the explanation is at most 150 characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub typology: Typology,
    pub explanation: String,
}

/// What the model is asked to return
#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(default)]
    typology: String,
    #[serde(default)]
    explanation: String,
}

/// Classification backend, selected once at startup
pub enum Classifier {
    Ollama(OllamaBackend),
    OpenAi(OpenAiBackend),
}

impl Classifier {
    /// Construct the configured backend
    pub fn from_config(config: &Config) -> Result<Self, ClassifierError> {
        match config.llm_provider {
            Provider::Ollama => Ok(Self::Ollama(OllamaBackend::new(
                &config.ollama_base_url,
                &config.ollama_model,
            )?)),
            Provider::OpenAi => {
                let api_key = config
                    .openai_api_key
                    .as_deref()
                    .ok_or(ClassifierError::MissingCredential)?;
                Ok(Self::OpenAi(OpenAiBackend::new(
                    &config.openai_base_url,
                    &config.openai_model,
                    api_key,
                )?))
            }
        }
    }

    /// Classify a license name into a typology plus a short rationale
    ///
    /// Malformed backend output is a hard error; an out-of-set label is not,
    /// it degrades to the `Productivity` fallback.
    pub async fn classify(&self, license_name: &str) -> Result<Classification, ClassifierError> {
        let prompt = build_prompt(license_name);

        let raw = match self {
            Self::Ollama(backend) => backend.complete(&prompt, SYSTEM_PROMPT).await?,
            Self::OpenAi(backend) => backend.complete(&prompt, SYSTEM_PROMPT).await?,
        };

        parse_classification(&raw)
    }
}

/// Build the shared instruction prompt embedding the license name and label set
fn build_prompt(license_name: &str) -> String {
    let labels: Vec<&str> = Typology::ALL.iter().map(|t| t.as_str()).collect();
    format!(
        "Classify this license name: \"{license_name}\"\n\
         \n\
         Rules:\n\
         - typology must be one of: {labels}\n\
         - explanation must be <= 150 characters\n\
         Return JSON like:\n\
         {{\"typology\":\"...\", \"explanation\":\"...\"}}",
        labels = labels.join(", ")
    )
}

/// Parse raw model text, then validate and repair the result
///
/// Parsing failure propagates. An out-of-set label is silently replaced with
/// the fallback label, and the fallback sentence is substituted when the model
/// gave no explanation at all.
fn parse_classification(raw: &str) -> Result<Classification, ClassifierError> {
    let parsed: RawClassification = serde_json::from_str(raw.trim())
        .map_err(|e| ClassifierError::Schema(e.to_string()))?;

    let label = parsed.typology.trim();
    let mut explanation = truncate_explanation(parsed.explanation.trim());

    let typology = match Typology::parse(label) {
        Some(typology) => typology,
        None => {
            tracing::warn!(label = %label, "Model returned out-of-set typology, using fallback");
            if explanation.is_empty() {
                explanation = truncate_explanation(FALLBACK_EXPLANATION);
            }
            Typology::Productivity
        }
    };

    Ok(Classification { typology, explanation })
}
