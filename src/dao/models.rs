use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

time::serde::format_description!(
    week_start_format,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// Stable platform identifier of a registered user.
///
/// Serialized as a plain number, which becomes a string key inside the `users` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Identifier of the private chat between the bot and this user.
    pub fn chat_id(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user record stored inside the `users` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Display name captured at registration time.
    pub name: String,
    /// Weekly target; `0` means the user has not set one yet.
    #[serde(default)]
    pub weekly_goal: u32,
    /// Workouts logged since the current week started.
    #[serde(default)]
    pub workouts_this_week: u32,
}

impl UserRecord {
    /// Fresh record for a newly registered user.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weekly_goal: 0,
            workouts_this_week: 0,
        }
    }

    /// Whether the user picked a weekly goal.
    pub fn has_goal(&self) -> bool {
        self.weekly_goal > 0
    }

    /// Whether the user met (or exceeded) a goal they actually set.
    pub fn goal_reached(&self) -> bool {
        self.has_goal() && self.workouts_this_week >= self.weekly_goal
    }
}

/// The single persisted document holding every piece of bot state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotState {
    /// Registered users in registration order (at most two).
    #[serde(default)]
    pub users: IndexMap<UserId, UserRecord>,
    /// Shared consequence for missing a goal.
    #[serde(default)]
    pub stakes: Option<String>,
    /// Monday 00:00:00 of the week currently being tracked.
    #[serde(default, with = "week_start_format::option")]
    pub week_start: Option<PrimitiveDateTime>,
    /// Raised by a rollover until the new-week notifications went out.
    #[serde(default)]
    pub needs_week_notification: bool,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn reads_document_written_by_previous_releases() {
        let raw = r#"{
          "users": {
            "1001": {"name": "Ana", "weekly_goal": 4, "workouts_this_week": 2},
            "2002": {"name": "Ben", "weekly_goal": 0, "workouts_this_week": 0}
          },
          "stakes": "loser buys dinner",
          "week_start": "2025-03-03T00:00:00"
        }"#;

        let state: BotState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.users.len(), 2);
        assert_eq!(state.users[&UserId(1001)].workouts_this_week, 2);
        assert_eq!(state.stakes.as_deref(), Some("loser buys dinner"));
        assert_eq!(state.week_start, Some(datetime!(2025-03-03 0:00)));
        assert!(!state.needs_week_notification);
    }

    #[test]
    fn writes_string_keys_and_iso_week_start() {
        let mut state = BotState::default();
        state.users.insert(UserId(42), UserRecord::new("Ana"));
        state.week_start = Some(datetime!(2025-03-10 0:00));

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["users"]["42"]["name"], "Ana");
        assert_eq!(value["week_start"], "2025-03-10T00:00:00");
        assert!(value["stakes"].is_null());
        assert_eq!(value["needs_week_notification"], false);
    }

    #[test]
    fn goal_reached_requires_a_goal() {
        let mut record = UserRecord::new("Ana");
        assert!(!record.goal_reached());
        record.weekly_goal = 2;
        record.workouts_this_week = 3;
        assert!(record.goal_reached());
    }
}
