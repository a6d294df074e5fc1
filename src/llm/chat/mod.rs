pub mod groq;
pub mod sse;

use async_trait::async_trait;
use futures::{ Future, Stream };
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use self::groq::GroqChatClient;
use super::{ LlmConfig, ProviderError };
use crate::models::chat::ConversationMessage;

/// Incremental assistant text in arrival order. Dropping it cancels the
/// underlying provider request.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send>>;

pub type FragmentSender = mpsc::Sender<Result<String, ProviderError>>;

const STREAM_BUFFER: usize = 32;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Starts a streamed completion over the full message list.
    async fn stream_chat(
        &self,
        messages: &[ConversationMessage]
    ) -> Result<FragmentStream, ProviderError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

/// Runs `producer` on its own task and exposes what it sends as a stream.
pub fn create_streaming_response<F, Fut>(producer: F) -> FragmentStream
    where
        F: FnOnce(FragmentSender) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static
{
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);

    tokio::spawn(async move {
        producer(tx).await;
    });

    Box::pin(ReceiverStream::new(rx))
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ProviderError> {
    let client = GroqChatClient::from_config(config)?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_streaming_response_preserves_order() {
        let stream = create_streaming_response(|tx| async move {
            for word in ["a", "b", "c"] {
                if tx.send(Ok(word.to_string())).await.is_err() {
                    return;
                }
            }
        });
        let collected: Vec<String> = stream
            .map(|r| r.unwrap())
            .collect().await;
        assert_eq!(collected, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_dropping_stream_stops_producer() {
        let (done_tx, done_rx) = tokio::sync::oneshot::channel();
        let stream = create_streaming_response(|tx| async move {
            let mut sent = 0usize;
            while tx.send(Ok("x".to_string())).await.is_ok() {
                sent += 1;
            }
            let _ = done_tx.send(sent);
        });
        drop(stream);
        let sent = done_rx.await.unwrap();
        assert!(sent <= STREAM_BUFFER);
    }
}
