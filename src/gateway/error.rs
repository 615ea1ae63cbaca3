use std::fmt;

/// Classified gateway error — tells the orchestrator *why* the hosted model
/// call failed. Every kind resolves the same way (fall back to the engine
/// for this turn), but the classification drives logging and lets a future
/// caller distinguish a bad credential from a transient outage.
#[derive(Debug)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// 401/403 — bad API key or permissions.
    Auth,
    /// 429 — rate limited.
    RateLimit,
    /// 404 or "model not found" — bad model name.
    NotFound,
    /// 408 or the client-side request timeout fired.
    Timeout,
    /// Connection refused, DNS failure, reset, etc.
    Network,
    /// 500/502/503/504 — provider-side outage.
    ServerError,
    /// The call succeeded but the body was not the expected shape.
    Malformed,
    /// Anything else.
    Unknown,
}

impl GatewayError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => GatewayErrorKind::Auth,
            404 => GatewayErrorKind::NotFound,
            408 => GatewayErrorKind::Timeout,
            429 => GatewayErrorKind::RateLimit,
            500 | 502 | 503 | 504 => GatewayErrorKind::ServerError,
            _ => GatewayErrorKind::Unknown,
        };
        Self {
            kind,
            status: Some(status),
            message: truncate_body(body),
        }
    }

    pub fn network(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            GatewayErrorKind::Timeout
        } else {
            GatewayErrorKind::Network
        };
        Self {
            kind,
            status: None,
            message: err.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::Malformed,
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "Gateway error ({}, {:?}): {}", status, self.kind, self.message)
        } else {
            write!(f, "Gateway error ({:?}): {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for GatewayError {}

fn truncate_body(body: &str) -> String {
    if body.len() > 300 {
        let mut end = 300;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_classify() {
        assert_eq!(GatewayError::from_status(401, "").kind, GatewayErrorKind::Auth);
        assert_eq!(
            GatewayError::from_status(429, "slow down").kind,
            GatewayErrorKind::RateLimit
        );
        assert_eq!(
            GatewayError::from_status(503, "").kind,
            GatewayErrorKind::ServerError
        );
        assert_eq!(
            GatewayError::from_status(418, "").kind,
            GatewayErrorKind::Unknown
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let err = GatewayError::from_status(500, &"x".repeat(1000));
        assert!(err.message.len() <= 303);
        assert!(err.message.ends_with("..."));
    }
}
