//! Gemini generateContent adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::AssistantConfig;
use crate::gateway::{AssistantGateway, GatewayError};
use crate::i18n::{self, Locale};
use crate::types::{ConversationState, Speaker};

pub struct GeminiGateway {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGateway {
    /// Build the adapter from config. The request timeout is mandatory: the
    /// engine must stay responsive even when the remote hangs, and a pending
    /// call cannot be cancelled once started.
    pub fn new(config: &AssistantConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Single-part prompt: system instruction, collected state, the running
    /// transcript, and the new utterance.
    fn build_prompt(&self, input: &str, state: &ConversationState, locale: Locale) -> String {
        let fields = &state.fields;
        let fmt_f64 = |v: Option<f64>| match v {
            Some(v) => v.to_string(),
            None => "Not provided".to_string(),
        };
        let term = match fields.loan_term_years {
            Some(y) => y.to_string(),
            None => "Not provided".to_string(),
        };

        let transcript = if state.history.is_empty() {
            "No previous conversation.".to_string()
        } else {
            state
                .history
                .iter()
                .map(|entry| {
                    let who = match entry.speaker {
                        Speaker::User => "User",
                        Speaker::Assistant => "Assistant",
                    };
                    format!("{}: {}", who, entry.text)
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "{system}\n\n\
Current conversation step: {step}\n\
User data collected so far:\n\
- Property Price: {price}\n\
- Down Payment: {down}\n\
- Interest Rate: {rate}\n\
- Loan Term: {term}\n\n\
Conversation History:\n\
{transcript}\n\n\
User Input: \"{input}\"\n\n\
Please respond in {language} and follow the conversation flow. Be helpful, friendly, and guide the user through the mortgage calculation process.",
            system = i18n::system_prompt(locale),
            step = state.stage.as_tag(),
            price = fmt_f64(fields.property_price),
            down = fmt_f64(fields.down_payment),
            rate = fmt_f64(fields.interest_rate),
            language = locale.language_name(),
        )
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 1024,
            },
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
            ]
        })
    }
}

#[async_trait]
impl AssistantGateway for GeminiGateway {
    async fn reply(
        &self,
        input: &str,
        state: &ConversationState,
        locale: Locale,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let prompt = self.build_prompt(input, state, locale);
        debug!(model = %self.model, prompt_chars = prompt.len(), "calling gemini");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(&prompt))
            .send()
            .await
            .map_err(|e| GatewayError::network(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(&e))?;

        if !status.is_success() {
            return Err(GatewayError::from_status(status.as_u16(), &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| GatewayError::malformed(format!("response is not JSON: {e}")))?;

        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                GatewayError::malformed("missing candidates[0].content.parts[0].text")
            })
    }
}
