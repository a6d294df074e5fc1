//! Completion relay: prepends the system instruction, opens a provider stream
//! and hands fragments back unchanged.

use futures::{ stream, StreamExt };
use log::{ info, warn };
use std::sync::Arc;
use uuid::Uuid;

use crate::config::prompt::FALLBACK_RESPONSE;
use crate::llm::chat::{ ChatClient, FragmentStream };
use crate::llm::ProviderError;
use crate::models::chat::{ ConversationMessage, Role };

/// What the caller should send back for one chat request.
pub enum RelayResponse {
    /// Provider produced at least one fragment (or finished cleanly with none).
    /// A later `Err` item means the provider failed mid-stream.
    Streaming(FragmentStream),
    /// Provider failed before any text arrived; send this text as a complete body.
    Fallback(&'static str),
}

impl std::fmt::Debug for RelayResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayResponse::Streaming(_) => f.write_str("Streaming(..)"),
            RelayResponse::Fallback(text) => f.debug_tuple("Fallback").field(text).finish(),
        }
    }
}

#[derive(Clone)]
pub struct CompletionRelay {
    client: Arc<dyn ChatClient>,
    system_instruction: Arc<str>,
}

impl CompletionRelay {
    pub fn new(client: Arc<dyn ChatClient>, system_instruction: Arc<str>) -> Self {
        Self { client, system_instruction }
    }

    pub fn model(&self) -> String {
        self.client.get_model()
    }

    /// `[system instruction] + messages`, caller order preserved.
    pub fn outbound_messages(&self, messages: Vec<ConversationMessage>) -> Vec<ConversationMessage> {
        let mut outbound = Vec::with_capacity(messages.len() + 1);
        outbound.push(ConversationMessage::system(self.system_instruction.as_ref()));
        outbound.extend(messages);
        outbound
    }

    /// Single attempt, no retries. Waits for the first fragment so that a
    /// failure before any text can still be answered with the fallback.
    pub async fn relay(&self, messages: Vec<ConversationMessage>) -> RelayResponse {
        let request_id = Uuid::new_v4();
        if messages.iter().any(|m| m.role == Role::System) {
            warn!("[{}] Caller supplied a system message; it follows the built-in instruction", request_id);
        }

        let outbound = self.outbound_messages(messages);
        info!("[{}] Relaying {} messages to {}", request_id, outbound.len(), self.client.get_model());

        let mut fragments = match self.client.stream_chat(&outbound).await {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!("[{}] Provider call failed, sending fallback: {}", request_id, e);
                return RelayResponse::Fallback(FALLBACK_RESPONSE);
            }
        };

        let first = match fragments.next().await {
            Some(Ok(first)) => first,
            Some(Err(e)) => {
                warn!("[{}] Provider failed before first fragment, sending fallback: {}", request_id, e);
                return RelayResponse::Fallback(FALLBACK_RESPONSE);
            }
            None => {
                info!("[{}] Provider finished without output", request_id);
                return RelayResponse::Streaming(Box::pin(stream::empty()));
            }
        };

        let fragments = stream::once(async move { Ok(first) }).chain(fragments);
        RelayResponse::Streaming(FragmentLog::new(request_id, Box::pin(fragments)).into_stream())
    }
}

/// Counts forwarded fragments and logs how the stream ended. Nothing is
/// yielded after the first error.
struct FragmentLog {
    request_id: Uuid,
    inner: FragmentStream,
    forwarded: usize,
    finished: bool,
}

impl FragmentLog {
    fn new(request_id: Uuid, inner: FragmentStream) -> Self {
        Self { request_id, inner, forwarded: 0, finished: false }
    }

    async fn next(&mut self) -> Option<Result<String, ProviderError>> {
        if self.finished {
            return None;
        }
        let item = self.inner.next().await;
        match &item {
            Some(Ok(_)) => {
                self.forwarded += 1;
            }
            Some(Err(e)) => {
                warn!(
                    "[{}] Provider failed after {} fragments, truncating response: {}",
                    self.request_id,
                    self.forwarded,
                    e
                );
                self.finished = true;
            }
            None => {
                info!("[{}] Stream finished after {} fragments", self.request_id, self.forwarded);
                self.finished = true;
            }
        }
        item
    }

    fn into_stream(self) -> FragmentStream {
        Box::pin(
            stream::unfold(self, |mut log| async move {
                let item = log.next().await?;
                Some((item, log))
            })
        )
    }
}
