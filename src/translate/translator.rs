use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::error::WhispererError;

/// Phrases the simulated translator knows, keyed by lowercase source text
/// and then by target language code.
const PHRASES: &[(&str, &[(&str, &str)])] = &[
    (
        "hello",
        &[
            ("es", "hola"),
            ("fr", "bonjour"),
            ("de", "hallo"),
            ("it", "ciao"),
            ("pt", "olá"),
            ("ru", "привет"),
            ("ja", "こんにちは"),
            ("ko", "안녕하세요"),
            ("zh", "你好"),
        ],
    ),
    (
        "goodbye",
        &[
            ("es", "adiós"),
            ("fr", "au revoir"),
            ("de", "auf wiedersehen"),
            ("it", "arrivederci"),
            ("pt", "tchau"),
            ("ru", "до свидания"),
            ("ja", "さようなら"),
            ("ko", "안녕히 가세요"),
            ("zh", "再见"),
        ],
    ),
    (
        "thank you",
        &[
            ("es", "gracias"),
            ("fr", "merci"),
            ("de", "danke"),
            ("it", "grazie"),
            ("pt", "obrigado"),
            ("ru", "спасибо"),
            ("ja", "ありがとう"),
            ("ko", "감사합니다"),
            ("zh", "谢谢"),
        ],
    ),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub success: bool,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub timestamp: String,
}

/// Simulated translation: table lookup, otherwise the text tagged with the
/// target language code.
pub async fn translate(
    request: TranslationRequest,
    delay: Duration,
) -> Result<TranslationResponse, WhispererError> {
    let (text, target) = match (request.text, request.target_language) {
        (Some(text), Some(target)) if !text.is_empty() && !target.is_empty() => (text, target),
        _ => {
            return Err(WhispererError::validation(
                "Text and target language are required",
            ))
        }
    };
    let source = request.source_language.unwrap_or_else(|| "auto".to_string());

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let translated = translate_text(&text, &target);
    info!(source = %source, target = %target, "Simulated translation");

    Ok(TranslationResponse {
        success: true,
        original_text: text,
        translated_text: translated,
        source_language: source,
        target_language: target,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub fn translate_text(text: &str, target: &str) -> String {
    let key = text.trim().to_lowercase();
    let known = PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == key)
        .and_then(|(_, by_lang)| by_lang.iter().find(|(lang, _)| *lang == target))
        .map(|(_, translated)| translated.to_string());

    known.unwrap_or_else(|| format!("[{}] {}", target.to_uppercase(), text))
}
