//! Test doubles shared by the integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::gateway::{AssistantGateway, GatewayError, GatewayErrorKind};
use crate::i18n::Locale;
use crate::types::ConversationState;

/// Scripted gateway: pops one canned outcome per call, then fails with a
/// simulated network error once the script runs out.
pub struct MockGateway {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: AtomicUsize,
}

impl MockGateway {
    /// A gateway whose every call fails with a network error.
    pub fn failing() -> Self {
        Self::with_script(Vec::new())
    }

    pub fn with_script(script: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(reply: &str) -> Result<String, GatewayError> {
        Ok(reply.to_string())
    }

    pub fn network_error() -> Result<String, GatewayError> {
        Err(GatewayError {
            kind: GatewayErrorKind::Network,
            status: None,
            message: "connection refused".to_string(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssistantGateway for MockGateway {
    async fn reply(
        &self,
        _input: &str,
        _state: &ConversationState,
        _locale: Locale,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .expect("mock script lock")
            .pop_front()
            .unwrap_or_else(Self::network_error)
    }
}

/// Lets a test keep a counting handle on a mock that the service owns.
#[async_trait]
impl AssistantGateway for Arc<MockGateway> {
    async fn reply(
        &self,
        input: &str,
        state: &ConversationState,
        locale: Locale,
    ) -> Result<String, GatewayError> {
        (**self).reply(input, state, locale).await
    }
}
