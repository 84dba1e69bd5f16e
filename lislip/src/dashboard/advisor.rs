//! Preparedness advice from the Gemini `generateContent` API
//!
//! The advisor never fails outward: every problem turns into one of the
//! fixed messages below so callers can render the result as-is.

use serde_json::{Value, json};
use url::Url;

use crate::config::AdvisorConfig;

use super::errors::ExternalServiceError;
use super::fetch::DataFetcher;

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a question first.";
pub const LOADING_MESSAGE: &str = "Getting advice...";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Sorry, I couldn't generate a response. The API returned an unexpected format. Please try again.";
pub const CONNECTION_FAILURE_MESSAGE: &str = "Sorry, I'm having trouble connecting to the AI service. Please check your internet connection and try again later.";

/// Wrap the user's question in the preparedness-expert framing
pub fn build_advice_prompt(question: &str) -> String {
    format!(
        "As a disaster preparedness expert in the Philippines, provide clear, concise, and actionable advice for the following question: \"{question}\". The advice should be practical for someone living in a city like Bacolod. Do not use markdown."
    )
}

fn request_body(question: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_advice_prompt(question) }]
        }]
    })
}

fn request_url(config: &AdvisorConfig) -> Url {
    let mut url = config.api_url.clone();
    url.query_pairs_mut().append_pair("key", &config.api_key);
    url
}

/// Pull `candidates[0].content.parts[0].text` out of a response
pub fn extract_advice(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Ask for advice on `question`, returning text ready for display
///
/// A blank question short-circuits without calling the API; any other
/// question is sent exactly as typed.
#[tracing::instrument(skip(fetcher, config), fields(question_len = question.len()))]
pub async fn get_advice(
    fetcher: &dyn DataFetcher,
    config: &AdvisorConfig,
    question: &str,
) -> String {
    if question.trim().is_empty() {
        return EMPTY_PROMPT_MESSAGE.to_string();
    }

    let response: Result<Value, ExternalServiceError> = fetcher
        .post_json(&request_url(config), &request_body(question))
        .await;

    match response {
        Ok(body) => match extract_advice(&body) {
            Some(advice) => advice.to_string(),
            None => {
                tracing::warn!("Advice response had an unexpected shape");
                MALFORMED_RESPONSE_MESSAGE.to_string()
            }
        },
        Err(e) => {
            tracing::error!("Error calling Gemini API: {}", e);
            CONNECTION_FAILURE_MESSAGE.to_string()
        }
    }
}
