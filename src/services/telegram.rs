//! Telegram transport: turns updates into [`InboundEvent`]s and implements [`Messenger`] on top
//! of the Bot API.

use futures::{FutureExt, future::BoxFuture};
use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    prelude::*,
    types::MessageId,
};
use tracing::info;

use crate::{
    dao::models::UserId,
    dto::inbound::{InboundEvent, MessageRef, Payload, Sender},
    error::ServiceError,
    services::{
        bot_service,
        messenger::{DeliveryError, Messenger},
    },
    state::SharedState,
};

/// [`Messenger`] backed by a teloxide [`Bot`].
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Wrap a bot handle.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl Messenger for TelegramMessenger {
    fn send(&self, chat_id: i64, text: String) -> BoxFuture<'static, Result<(), DeliveryError>> {
        let bot = self.bot.clone();
        async move {
            bot.send_message(ChatId(chat_id), text)
                .await
                .map(|_| ())
                .map_err(|err| DeliveryError::new(chat_id, err))
        }
        .boxed()
    }

    fn forward(
        &self,
        chat_id: i64,
        message: MessageRef,
    ) -> BoxFuture<'static, Result<(), DeliveryError>> {
        let bot = self.bot.clone();
        async move {
            bot.forward_message(
                ChatId(chat_id),
                ChatId(message.chat_id),
                MessageId(message.message_id),
            )
            .await
            .map(|_| ())
            .map_err(|err| DeliveryError::new(chat_id, err))
        }
        .boxed()
    }
}

/// Map a Telegram message to an inbound event; messages without an author are dropped.
pub fn inbound_event(msg: &Message) -> Option<InboundEvent> {
    let from = msg.from.as_ref()?;
    let payload = if msg.video_note().is_some() {
        Payload::VideoNote
    } else {
        msg.text().map(Payload::from_text).unwrap_or(Payload::Other)
    };

    Some(InboundEvent {
        sender: Sender {
            id: UserId(from.id.0),
            first_name: Some(from.first_name.clone()),
            username: from.username.clone(),
        },
        origin: MessageRef {
            chat_id: msg.chat.id.0,
            message_id: msg.id.0,
        },
        payload,
    })
}

async fn handle_message(bot: Bot, msg: Message, state: SharedState) -> Result<(), ServiceError> {
    let Some(event) = inbound_event(&msg) else {
        return Ok(());
    };
    let messenger = TelegramMessenger::new(bot);
    bot_service::handle_event(&state, &messenger, event).await
}

/// Update handler tree: every message goes to the command dispatcher.
pub fn schema() -> UpdateHandler<ServiceError> {
    dptree::entry().branch(Update::filter_message().endpoint(handle_message))
}

/// Poll Telegram for updates until the process is asked to stop.
pub async fn run(state: SharedState) {
    let bot = Bot::new(state.config().token());
    info!("starting Telegram long polling");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Telegram dispatcher stopped");
}
