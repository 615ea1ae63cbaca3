use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named point in the conversation's forward progression.
///
/// The machine is cyclic: `Results` and `Support` always loop back to
/// `Greeting` or `PropertyPrice`, matching an ongoing chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    PropertyPrice,
    DownPayment,
    InterestRate,
    LoanTerm,
    Results,
    Support,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Greeting
    }
}

impl Stage {
    /// Parse a caller-supplied stage tag. An unknown tag means the caller
    /// handed us a corrupted session, which is a programming error on their
    /// side; the conversation restarts from `Greeting`.
    #[allow(dead_code)] // UI-boundary parser; the terminal channel keeps typed state.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "greeting" => Stage::Greeting,
            "property_price" => Stage::PropertyPrice,
            "down_payment" => Stage::DownPayment,
            "interest_rate" => Stage::InterestRate,
            "loan_term" => Stage::LoanTerm,
            "results" => Stage::Results,
            "support" => Stage::Support,
            _ => Stage::Greeting,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::PropertyPrice => "property_price",
            Stage::DownPayment => "down_payment",
            Stage::InterestRate => "interest_rate",
            Stage::LoanTerm => "loan_term",
            Stage::Results => "results",
            Stage::Support => "support",
        }
    }
}

/// Loan parameters collected so far, populated one field per stage as the
/// conversation advances. Never populated out of order relative to `Stage`:
/// - `down_payment`, once set, is strictly less than `property_price`
/// - `interest_rate` lies in (0, 20), both bounds exclusive
/// - `loan_term_years` lies in (0, 50]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_term_years: Option<u32>,
}

impl LoanFields {
    pub fn clear(&mut self) {
        *self = LoanFields::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One utterance in the running transcript. The transcript is append-only
/// and is read only when building the assistant gateway prompt; the
/// deterministic engine never consults it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-session conversation state. Exclusively owned by the session's turn
/// loop and threaded through every call; turns are serialized, so there is
/// no shared mutable state to guard.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub stage: Stage,
    pub fields: LoanFields,
    pub history: Vec<HistoryEntry>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full reset: back to `Greeting` with all fields and the transcript
    /// cleared. Used by the recalculate intent.
    pub fn reset(&mut self) {
        self.stage = Stage::Greeting;
        self.fields.clear();
        self.history.clear();
    }

    pub fn push_user(&mut self, text: &str) {
        self.history.push(HistoryEntry {
            speaker: Speaker::User,
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn push_assistant(&mut self, text: &str) {
        self.history.push(HistoryEntry {
            speaker: Speaker::Assistant,
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }
}

/// Per-turn reply contract exposed to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReply {
    #[serde(rename = "responseText")]
    pub response: String,
    #[serde(rename = "nextStep")]
    pub next_step: Stage,
    #[serde(rename = "collectedFields")]
    pub fields: LoanFields,
}
