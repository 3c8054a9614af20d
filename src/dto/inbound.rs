//! Transport-independent view of an inbound chat message.

use std::str::FromStr;

use crate::dao::models::UserId;

/// Commands understood by the bot, parsed from `/name` (an `@botname` suffix is ignored).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register, or greet an already registered user.
    Start,
    /// Set the weekly workout goal.
    SetGoal,
    /// Set the shared stakes.
    SetStakes,
    /// Show this week's progress for both partners.
    Progress,
    /// Show rollover diagnostics or force a reset.
    TestReset,
    /// Show the sender's platform identity.
    MyId,
    /// Anything else starting with `/`.
    Unknown(String),
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.split('@').next().unwrap_or(s).to_ascii_lowercase();
        match name.as_str() {
            "start" => Ok(Command::Start),
            "setgoal" => Ok(Command::SetGoal),
            "setstakes" => Ok(Command::SetStakes),
            "progress" => Ok(Command::Progress),
            "test_reset" => Ok(Command::TestReset),
            "myid" => Ok(Command::MyId),
            _ => Ok(Command::Unknown(name)),
        }
    }
}

/// What the message carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A `/command` with whitespace-separated arguments.
    Command { command: Command, args: Vec<String> },
    /// A round video message, which logs a workout.
    VideoNote,
    /// Plain text or media the bot does not react to.
    Other,
}

impl Payload {
    /// Classify a text message.
    pub fn from_text(text: &str) -> Self {
        let Some(body) = text.trim_start().strip_prefix('/') else {
            return Payload::Other;
        };
        let mut parts = body.split_whitespace();
        let Some(name) = parts.next() else {
            return Payload::Other;
        };
        let command = Command::from_str(name).unwrap_or(Command::Unknown(name.to_string()));
        Payload::Command {
            command,
            args: parts.map(str::to_string).collect(),
        }
    }
}

/// Location of a message, used to reply to it or forward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    /// Chat the message was posted in.
    pub chat_id: i64,
    /// Identifier of the message inside that chat.
    pub message_id: i32,
}

/// Who sent the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Stable platform identifier.
    pub id: UserId,
    /// First name shown by the platform, if any.
    pub first_name: Option<String>,
    /// Platform username (without `@`), if the user set one.
    pub username: Option<String>,
}

impl Sender {
    /// First name, or `fallback` when the platform did not provide one.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.first_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
    }
}

/// One inbound message handed to the command dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Author of the message.
    pub sender: Sender,
    /// Where the message lives; replies go to `origin.chat_id`.
    pub origin: MessageRef,
    /// Parsed content.
    pub payload: Payload,
}
