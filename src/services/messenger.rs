use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dto::inbound::MessageRef;

/// An outbound message could not be delivered.
///
/// Callers log it and move on; delivery is best effort and never retried.
#[derive(Debug, Error)]
#[error("failed to deliver message to chat {chat_id}")]
pub struct DeliveryError {
    /// Chat the message was meant for.
    pub chat_id: i64,
    #[source]
    source: Box<dyn Error + Send + Sync>,
}

impl DeliveryError {
    /// Wrap any transport failure.
    pub fn new(chat_id: i64, source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            chat_id,
            source: Box::new(source),
        }
    }
}

/// Outbound side of the chat transport.
pub trait Messenger: Send + Sync {
    /// Send a text message to `chat_id`.
    fn send(&self, chat_id: i64, text: String) -> BoxFuture<'static, Result<(), DeliveryError>>;
    /// Forward an existing message to `chat_id`.
    fn forward(
        &self,
        chat_id: i64,
        message: MessageRef,
    ) -> BoxFuture<'static, Result<(), DeliveryError>>;
}
