//! Turn orchestration: gateway first, deterministic engine as the fallback.

use tracing::{debug, warn};

use crate::engine;
use crate::gateway::{self, AssistantGateway};
use crate::i18n::{self, Locale, PromptKey};
use crate::types::{ConversationState, TurnReply};

/// One chat session. Owns its `ConversationState` exclusively; turns are
/// processed one at a time, so a session never needs locking.
pub struct ChatService {
    state: ConversationState,
    locale: Locale,
    gateway: Option<Box<dyn AssistantGateway>>,
}

impl ChatService {
    pub fn new(locale: Locale) -> Self {
        Self {
            state: ConversationState::new(),
            locale,
            gateway: None,
        }
    }

    pub fn with_gateway(locale: Locale, gateway: Box<dyn AssistantGateway>) -> Self {
        Self {
            state: ConversationState::new(),
            locale,
            gateway: Some(gateway),
        }
    }

    #[allow(dead_code)] // Used by tests and state-inspecting callers.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Opening message shown before the first user turn.
    pub fn greeting(&self) -> &'static str {
        i18n::prompt(self.locale, PromptKey::Greeting)
    }

    /// Process one utterance in the session's default language.
    pub async fn process(&mut self, input: &str) -> TurnReply {
        self.process_turn(input, self.locale).await
    }

    /// Process one utterance with an explicit per-turn language tag, as the
    /// UI supplies it. Unrecognized tags fall back to English.
    #[allow(dead_code)] // The terminal channel speaks one language per session.
    pub async fn process_tagged(&mut self, input: &str, lang_tag: &str) -> TurnReply {
        self.process_turn(input, Locale::from_tag(lang_tag)).await
    }

    /// One turn: offer the utterance to the gateway when one is configured,
    /// otherwise (or on any gateway failure — no retry) run the
    /// deterministic engine. Gateway output is reconciled against the active
    /// stage before it can mutate state, so the invariants hold on both
    /// paths. The failure itself is logged, never surfaced to the user.
    async fn process_turn(&mut self, input: &str, locale: Locale) -> TurnReply {
        self.state.push_user(input);

        if let Some(gw) = &self.gateway {
            match gw.reply(input, &self.state, locale).await {
                Ok(text) => {
                    let (next, fields) =
                        gateway::reconcile(&text, self.state.stage, &self.state.fields);
                    debug!(
                        from = self.state.stage.as_tag(),
                        to = next.as_tag(),
                        "gateway turn reconciled"
                    );
                    self.state.stage = next;
                    self.state.fields = fields;
                    self.state.push_assistant(&text);
                    return TurnReply {
                        response: text,
                        next_step: next,
                        fields: self.state.fields.clone(),
                    };
                }
                Err(err) => {
                    warn!(error = %err, "assistant gateway failed; using deterministic engine");
                }
            }
        }

        let reply = engine::respond(&mut self.state, input, locale);
        self.state.push_assistant(&reply.response);
        reply
    }
}
