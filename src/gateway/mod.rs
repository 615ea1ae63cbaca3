//! Assistant gateway: an optional natural-language layer over the engine.
//!
//! The gateway is a best-effort enhancement, never a dependency: a single
//! failed or malformed call falls straight back to the deterministic engine
//! for that turn, with no retry. Whatever the hosted model replies is
//! narrowed through [`reconcile`] before it can touch session state, so a
//! gateway can never advance the conversation past what the engine's own
//! bounds checks would allow.

mod error;
mod gemini;

use async_trait::async_trait;

pub use error::{GatewayError, GatewayErrorKind};
pub use gemini::GeminiGateway;

use crate::i18n::Locale;
use crate::intent;
use crate::types::{ConversationState, LoanFields, Stage};

#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// One free-form reply for the new utterance, given the full session
    /// context. Allowed to fail; the caller handles fallback.
    async fn reply(
        &self,
        input: &str,
        state: &ConversationState,
        locale: Locale,
    ) -> Result<String, GatewayError>;
}

/// Validate a gateway reply against the active stage before trusting it.
///
/// Numbers are extracted from the reply text and the first one is applied to
/// the field the current stage is collecting, under the same bounds the
/// engine enforces. If nothing reconciles, the stage stays where it is — the
/// transcript gets the nicer wording but the state machine does not move.
pub fn reconcile(reply: &str, stage: Stage, fields: &LoanFields) -> (Stage, LoanFields) {
    let mut fields = fields.clone();
    let mut next = stage;
    let first = intent::extract_numbers(reply).into_iter().next();

    match stage {
        Stage::PropertyPrice => {
            if let Some(v) = first {
                if v > 0.0 {
                    fields.property_price = Some(v);
                    next = Stage::DownPayment;
                }
            }
        }
        Stage::DownPayment => {
            if let Some(v) = first {
                if v >= 0.0 && fields.property_price.is_some_and(|p| v < p) {
                    fields.down_payment = Some(v);
                    next = Stage::InterestRate;
                }
            }
        }
        Stage::InterestRate => {
            if let Some(v) = first {
                if v > 0.0 && v < 20.0 {
                    fields.interest_rate = Some(v);
                    next = Stage::LoanTerm;
                }
            }
        }
        Stage::LoanTerm => {
            if let Some(v) = first {
                let years = v.round();
                if years >= 1.0 && years <= 50.0 {
                    fields.loan_term_years = Some(years as u32);
                    next = Stage::Results;
                }
            }
        }
        // Free-text stages collect nothing; the engine owns those moves.
        Stage::Greeting | Stage::Results | Stage::Support => {}
    }

    (next, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_applies_first_in_bounds_number() {
        let (next, fields) = reconcile(
            "Great, a $400,000 home! What's your down payment?",
            Stage::PropertyPrice,
            &LoanFields::default(),
        );
        assert_eq!(next, Stage::DownPayment);
        assert_eq!(fields.property_price, Some(400_000.0));
    }

    #[test]
    fn reconcile_rejects_out_of_bounds_values() {
        let base = LoanFields {
            property_price: Some(300_000.0),
            down_payment: Some(60_000.0),
            ..Default::default()
        };

        // A rate of 25% violates the exclusive (0, 20) bound.
        let (next, fields) = reconcile("Let's try a 25% rate!", Stage::InterestRate, &base);
        assert_eq!(next, Stage::InterestRate);
        assert!(fields.interest_rate.is_none());

        // A down payment at or above the price never reconciles.
        let (next, fields) = reconcile(
            "Sure, $300,000 down it is.",
            Stage::DownPayment,
            &LoanFields {
                property_price: Some(300_000.0),
                ..Default::default()
            },
        );
        assert_eq!(next, Stage::DownPayment);
        assert!(fields.down_payment.is_none());
    }

    #[test]
    fn reconcile_never_moves_free_text_stages() {
        for stage in [Stage::Greeting, Stage::Results, Stage::Support] {
            let (next, fields) = reconcile("Sure, 12345!", stage, &LoanFields::default());
            assert_eq!(next, stage);
            assert_eq!(fields, LoanFields::default());
        }
    }

    #[test]
    fn reconcile_without_numbers_is_a_no_op() {
        let (next, fields) = reconcile(
            "Could you give me a number?",
            Stage::PropertyPrice,
            &LoanFields::default(),
        );
        assert_eq!(next, Stage::PropertyPrice);
        assert_eq!(fields, LoanFields::default());
    }

    #[test]
    fn reconcile_rounds_loan_term_to_whole_years() {
        let base = LoanFields {
            property_price: Some(400_000.0),
            down_payment: Some(80_000.0),
            interest_rate: Some(6.5),
            ..Default::default()
        };
        let (next, fields) = reconcile("Let's go with 30 years.", Stage::LoanTerm, &base);
        assert_eq!(next, Stage::Results);
        assert_eq!(fields.loan_term_years, Some(30));

        let (next, _) = reconcile("0.2 years is too short", Stage::LoanTerm, &base);
        assert_eq!(next, Stage::LoanTerm);
    }
}
