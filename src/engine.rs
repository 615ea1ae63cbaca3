//! Deterministic conversation engine.
//!
//! Pure function of (state, utterance) → (new state, reply). This is the
//! system of record for correctness: the assistant gateway may layer nicer
//! language on top, but every transition and bound here is authoritative.
//! No I/O, and the transcript in `state.history` is never read.

use tracing::debug;

use crate::i18n::{self, Locale, PromptKey};
use crate::intent::{self, Intent};
use crate::loan;
use crate::types::{ConversationState, Stage, TurnReply};

/// Process one utterance against the step machine. The stage only moves
/// forward through the collection order, or resets fully on recalculate.
pub fn respond(state: &mut ConversationState, input: &str, locale: Locale) -> TurnReply {
    let intent = intent::classify(input);
    debug!(stage = state.stage.as_tag(), ?intent, "engine turn");

    let response = match state.stage {
        Stage::Greeting => greeting(state, intent, locale),
        Stage::PropertyPrice => property_price(state, input, intent, locale),
        Stage::DownPayment => down_payment(state, input, intent, locale),
        Stage::InterestRate => interest_rate(state, input, intent, locale),
        Stage::LoanTerm => loan_term(state, input, intent, locale),
        Stage::Results => results(state, intent, locale),
        Stage::Support => support(state, input, intent, locale),
    };

    TurnReply {
        response,
        next_step: state.stage,
        fields: state.fields.clone(),
    }
}

fn greeting(state: &mut ConversationState, intent: Intent, locale: Locale) -> String {
    match intent {
        Intent::Greeting | Intent::Calculation => {
            state.stage = Stage::PropertyPrice;
            i18n::prompt(locale, PromptKey::PropertyPrice).to_string()
        }
        Intent::Goodbye => i18n::prompt(locale, PromptKey::Goodbye).to_string(),
        _ => i18n::prompt(locale, PromptKey::Clarify).to_string(),
    }
}

fn property_price(
    state: &mut ConversationState,
    input: &str,
    intent: Intent,
    locale: Locale,
) -> String {
    match intent {
        Intent::NumberInput => match intent::extract_number(input) {
            Some(price) if price > 0.0 => {
                state.fields.property_price = Some(price);
                state.stage = Stage::DownPayment;
                i18n::prompt(locale, PromptKey::DownPayment).to_string()
            }
            _ => i18n::prompt(locale, PromptKey::InvalidPrice).to_string(),
        },
        Intent::Help => i18n::prompt(locale, PromptKey::HelpPropertyPrice).to_string(),
        _ => i18n::prompt(locale, PromptKey::InvalidPrice).to_string(),
    }
}

fn down_payment(
    state: &mut ConversationState,
    input: &str,
    intent: Intent,
    locale: Locale,
) -> String {
    match intent {
        Intent::NumberInput => match intent::extract_number(input) {
            Some(down)
                if down >= 0.0 && state.fields.property_price.is_some_and(|p| down < p) =>
            {
                state.fields.down_payment = Some(down);
                state.stage = Stage::InterestRate;
                i18n::prompt(locale, PromptKey::InterestRate).to_string()
            }
            _ => i18n::prompt(locale, PromptKey::InvalidDownPayment).to_string(),
        },
        Intent::Help => i18n::prompt(locale, PromptKey::HelpDownPayment).to_string(),
        _ => i18n::prompt(locale, PromptKey::InvalidDownPayment).to_string(),
    }
}

fn interest_rate(
    state: &mut ConversationState,
    input: &str,
    intent: Intent,
    locale: Locale,
) -> String {
    match intent {
        Intent::NumberInput => match intent::extract_number(input) {
            // Bounds are exclusive on both ends: 0 and 20 exactly are rejected.
            Some(rate) if rate > 0.0 && rate < 20.0 => {
                state.fields.interest_rate = Some(rate);
                state.stage = Stage::LoanTerm;
                i18n::prompt(locale, PromptKey::LoanTerm).to_string()
            }
            _ => i18n::prompt(locale, PromptKey::InvalidRate).to_string(),
        },
        Intent::Help => i18n::prompt(locale, PromptKey::HelpInterestRate).to_string(),
        _ => i18n::prompt(locale, PromptKey::InvalidRate).to_string(),
    }
}

fn loan_term(
    state: &mut ConversationState,
    input: &str,
    intent: Intent,
    locale: Locale,
) -> String {
    match intent {
        Intent::NumberInput => match intent::extract_integer(input) {
            Some(years) if years > 0 && years <= 50 => {
                let (Some(price), Some(down), Some(rate)) = (
                    state.fields.property_price,
                    state.fields.down_payment,
                    state.fields.interest_rate,
                ) else {
                    // Unreachable through normal stage ordering; treat a
                    // half-populated session as corrupted and start over.
                    state.reset();
                    return i18n::prompt(locale, PromptKey::Fallback).to_string();
                };
                let years = years as u32;
                state.fields.loan_term_years = Some(years);
                state.stage = Stage::Results;
                let breakdown = loan::amortize(price, down, rate, years);
                i18n::format_breakdown(locale, &breakdown)
            }
            _ => i18n::prompt(locale, PromptKey::InvalidTerm).to_string(),
        },
        Intent::Help => i18n::prompt(locale, PromptKey::HelpLoanTerm).to_string(),
        _ => i18n::prompt(locale, PromptKey::InvalidTerm).to_string(),
    }
}

fn results(state: &mut ConversationState, intent: Intent, locale: Locale) -> String {
    match intent {
        // "recalculate" itself classifies as Calculation (it contains the
        // earlier-declared "calculate" keyword), so both intents restart.
        Intent::Recalculate | Intent::Calculation => {
            state.reset();
            state.stage = Stage::PropertyPrice;
            i18n::prompt(locale, PromptKey::PropertyPrice).to_string()
        }
        Intent::Download => {
            state.stage = Stage::Greeting;
            i18n::prompt(locale, PromptKey::DownloadReady).to_string()
        }
        Intent::Help => {
            state.stage = Stage::Support;
            i18n::prompt(locale, PromptKey::Support).to_string()
        }
        _ => {
            state.stage = Stage::Greeting;
            i18n::prompt(locale, PromptKey::ThankYou).to_string()
        }
    }
}

fn support(state: &mut ConversationState, input: &str, intent: Intent, locale: Locale) -> String {
    state.stage = Stage::Greeting;
    if intent == Intent::Greeting || is_affirmative(input, locale) {
        i18n::prompt(locale, PromptKey::HumanSupport).to_string()
    } else {
        i18n::prompt(locale, PromptKey::NoSupport).to_string()
    }
}

fn is_affirmative(input: &str, locale: Locale) -> bool {
    let lower = input.to_lowercase();
    let words: &[&str] = match locale {
        Locale::En => &["yes"],
        Locale::Es => &["sí", "si", "yes"],
        Locale::Fr => &["oui", "yes"],
    };
    words.iter().any(|w| lower.contains(w))
}
