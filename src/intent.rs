//! Rule-based intent classification and numeric extraction.
//!
//! This is deliberately not a model: lower-cased substring matching against
//! fixed keyword sets, first matching category wins in declaration order.
//! Downstream behavior depends on that tie-breaking (for example
//! "recalculate" contains "calculate" and therefore classifies as a
//! calculation request), so the order here must not be rearranged.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Calculation,
    PropertyPrice,
    DownPayment,
    InterestRate,
    LoanTerm,
    Help,
    Goodbye,
    Recalculate,
    Download,
    /// No keyword matched but the text looks like a raw numeric answer.
    NumberInput,
    Unknown,
}

/// Keyword sets in declaration order; first match wins.
const KEYWORD_SETS: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hi", "hello", "hey", "start", "begin"]),
    (
        Intent::Calculation,
        &["calculate", "mortgage", "payment", "emi", "monthly"],
    ),
    (
        Intent::PropertyPrice,
        &["price", "cost", "home price", "property value"],
    ),
    (
        Intent::DownPayment,
        &["down payment", "downpayment", "deposit", "initial payment"],
    ),
    (
        Intent::InterestRate,
        &["rate", "interest", "apr", "percentage"],
    ),
    (Intent::LoanTerm, &["years", "term", "duration", "length"]),
    (Intent::Help, &["help", "support", "assist", "guide"]),
    (Intent::Goodbye, &["bye", "goodbye", "exit", "end", "stop"]),
    (Intent::Recalculate, &["recalculate", "again", "new", "restart"]),
    (
        Intent::Download,
        &["download", "breakdown", "report", "summary"],
    ),
];

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\d{1,3}(,\d{3})*(\.\d{2})?").unwrap());
static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+%").unwrap());
static YEARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\s*years?").unwrap());

/// Leading number in the style of a lenient float parse: optional sign,
/// digits, optional fraction and exponent; anything after is ignored.
static LEADING_FLOAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap());
static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+").unwrap());

/// All numeric tokens in free text, currency-formatted or plain.
static NUMBER_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\d{1,3}(,\d{3})*(\.\d{2})?|\d+(\.\d+)?%?").unwrap());

pub fn classify(input: &str) -> Intent {
    let lower = input.to_lowercase();
    for (intent, keywords) in KEYWORD_SETS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *intent;
        }
    }
    if CURRENCY_RE.is_match(input) || PERCENT_RE.is_match(input) || YEARS_RE.is_match(input) {
        return Intent::NumberInput;
    }
    Intent::Unknown
}

/// Strip currency symbols, percent signs and thousands separators, then take
/// the leading float. `None` when nothing numeric leads the text.
pub fn extract_number(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    let trimmed = cleaned.trim_start();
    LEADING_FLOAT_RE
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Leading integer from the raw text, fractional part discarded. Used for
/// the loan term, which is collected in whole years.
pub fn extract_integer(input: &str) -> Option<i64> {
    LEADING_INT_RE
        .find(input.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Every numeric value mentioned in free text, in order of appearance. Used
/// to reconcile an assistant gateway reply against the active stage.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_TOKEN_RE
        .find_iter(text)
        .filter_map(|m| extract_number(m.as_str()))
        .collect()
}
