//! Two-seat roster: registration, partner lookup, goals, workout counters and stakes.

use thiserror::Error;
use tracing::info;

use crate::{
    config::{MAX_USERS, MAX_WEEKLY_GOAL, MIN_WEEKLY_GOAL},
    dao::{
        models::{UserId, UserRecord},
        storage::StorageError,
    },
};

use super::tracker::WeeklyTracker;

/// Text shown for the stakes until someone sets them.
pub const STAKES_NOT_SET: &str = "Not set";

/// Failures of roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Both seats are taken.
    #[error("roster is full")]
    Full,
    /// Goal outside `MIN_WEEKLY_GOAL..=MAX_WEEKLY_GOAL`.
    #[error("weekly goal {goal} is outside the allowed range")]
    GoalOutOfRange {
        /// Rejected value.
        goal: u32,
    },
    /// The user never registered.
    #[error("user `{0}` is not registered")]
    NotRegistered(UserId),
    /// The change could not be written through.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of logging one workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutRecordResult {
    /// Workouts logged this week, including this one.
    pub workouts_done: u32,
    /// The user's weekly goal.
    pub goal: u32,
    /// `true` only for the workout that lands exactly on the goal.
    pub goal_just_reached: bool,
}

impl WeeklyTracker {
    /// Take a free seat for `user_id`.
    pub fn register(&mut self, user_id: UserId, name: &str) -> Result<(), RosterError> {
        if self.state.users.len() >= MAX_USERS {
            return Err(RosterError::Full);
        }
        self.state.users.insert(user_id, UserRecord::new(name));
        self.persist()?;
        info!(
            %user_id,
            display_name = name,
            seats_taken = self.state.users.len(),
            "user registered"
        );
        Ok(())
    }

    /// Whether `user_id` holds a seat.
    pub fn exists(&self, user_id: UserId) -> bool {
        self.state.users.contains_key(&user_id)
    }

    /// Record of a registered user.
    pub fn user(&self, user_id: UserId) -> Option<&UserRecord> {
        self.state.users.get(&user_id)
    }

    /// Number of taken seats.
    pub fn user_count(&self) -> usize {
        self.state.users.len()
    }

    /// Registered users in registration order.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.state.users.keys().copied().collect()
    }

    /// The other seat holder, when `user_id` holds one seat and the other one is taken.
    pub fn partner_of(&self, user_id: UserId) -> Option<UserId> {
        if self.state.users.len() != MAX_USERS || !self.exists(user_id) {
            return None;
        }
        self.state.users.keys().copied().find(|id| *id != user_id)
    }

    /// Set the weekly goal of a registered user. Out-of-range values leave the state untouched.
    pub fn set_goal(&mut self, user_id: UserId, goal: u32) -> Result<(), RosterError> {
        if !(MIN_WEEKLY_GOAL..=MAX_WEEKLY_GOAL).contains(&goal) {
            return Err(RosterError::GoalOutOfRange { goal });
        }
        let record = self
            .state
            .users
            .get_mut(&user_id)
            .ok_or(RosterError::NotRegistered(user_id))?;
        record.weekly_goal = goal;
        self.persist()?;
        Ok(())
    }

    /// Log one workout. There is no cap; counts past the goal keep going up.
    pub fn record_workout(&mut self, user_id: UserId) -> Result<WorkoutRecordResult, RosterError> {
        let record = self
            .state
            .users
            .get_mut(&user_id)
            .ok_or(RosterError::NotRegistered(user_id))?;
        record.workouts_this_week += 1;
        let result = WorkoutRecordResult {
            workouts_done: record.workouts_this_week,
            goal: record.weekly_goal,
            goal_just_reached: record.workouts_this_week == record.weekly_goal,
        };
        self.persist()?;
        Ok(result)
    }

    /// Replace the shared stakes text.
    pub fn set_stakes(&mut self, stakes: impl Into<String>) -> Result<(), RosterError> {
        self.state.stakes = Some(stakes.into());
        self.persist()?;
        Ok(())
    }

    /// Current stakes, or [`STAKES_NOT_SET`].
    pub fn stakes(&self) -> &str {
        self.state.stakes.as_deref().unwrap_or(STAKES_NOT_SET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tracker::test_support::{ANA, BEN, CAL, empty_tracker, paired_tracker};

    #[test]
    fn registration_creates_blank_record_and_persists() {
        let (mut tracker, store) = empty_tracker();

        tracker.register(ANA, "Ana").unwrap();

        let record = tracker.user(ANA).unwrap();
        assert_eq!(record, &UserRecord::new("Ana"));
        assert!(tracker.exists(ANA));
        assert!(!tracker.exists(BEN));
        assert_eq!(store.snapshot().unwrap().users.len(), 1);
    }

    #[test]
    fn third_registration_is_rejected_in_any_order() {
        for order in [[ANA, BEN, CAL], [CAL, ANA, BEN], [BEN, CAL, ANA]] {
            let (mut tracker, _store) = empty_tracker();
            tracker.register(order[0], "first").unwrap();
            tracker.register(order[1], "second").unwrap();

            let err = tracker.register(order[2], "third").unwrap_err();
            assert!(matches!(err, RosterError::Full));
            assert_eq!(tracker.user_count(), 2);
            assert!(!tracker.exists(order[2]));
        }
    }

    #[test]
    fn partner_requires_both_seats_taken() {
        let (mut tracker, _store) = empty_tracker();
        assert_eq!(tracker.partner_of(ANA), None);

        tracker.register(ANA, "Ana").unwrap();
        assert_eq!(tracker.partner_of(ANA), None);

        tracker.register(BEN, "Ben").unwrap();
        assert_eq!(tracker.partner_of(ANA), Some(BEN));
        assert_eq!(tracker.partner_of(BEN), Some(ANA));
        assert_eq!(tracker.partner_of(CAL), None);
    }

    #[test]
    fn every_goal_in_range_is_accepted() {
        let (mut tracker, _store) = paired_tracker();
        for goal in MIN_WEEKLY_GOAL..=MAX_WEEKLY_GOAL {
            tracker.set_goal(ANA, goal).unwrap();
            assert_eq!(tracker.user(ANA).unwrap().weekly_goal, goal);
        }
    }

    #[test]
    fn goals_out_of_range_leave_state_unchanged() {
        let (mut tracker, store) = paired_tracker();
        tracker.set_goal(ANA, 3).unwrap();
        let before = store.snapshot();

        for goal in [0, 8, 100, u32::MAX] {
            let err = tracker.set_goal(ANA, goal).unwrap_err();
            assert!(matches!(err, RosterError::GoalOutOfRange { goal: g } if g == goal));
        }

        assert_eq!(tracker.user(ANA).unwrap().weekly_goal, 3);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn unknown_user_cannot_set_goal_or_log() {
        let (mut tracker, _store) = paired_tracker();
        assert!(matches!(
            tracker.set_goal(CAL, 3),
            Err(RosterError::NotRegistered(id)) if id == CAL
        ));
        assert!(matches!(
            tracker.record_workout(CAL),
            Err(RosterError::NotRegistered(_))
        ));
    }

    #[test]
    fn goal_reached_exactly_once_then_keeps_counting() {
        let (mut tracker, store) = paired_tracker();
        tracker.set_goal(ANA, 4).unwrap();
        tracker.set_goal(BEN, 3).unwrap();

        for expected in 1..=3 {
            let result = tracker.record_workout(ANA).unwrap();
            assert_eq!(result.workouts_done, expected);
            assert!(!result.goal_just_reached);
        }

        let fourth = tracker.record_workout(ANA).unwrap();
        assert_eq!(
            fourth,
            WorkoutRecordResult {
                workouts_done: 4,
                goal: 4,
                goal_just_reached: true,
            }
        );

        let fifth = tracker.record_workout(ANA).unwrap();
        assert_eq!(fifth.workouts_done, 5);
        assert!(!fifth.goal_just_reached);

        assert_eq!(tracker.user(BEN).unwrap().workouts_this_week, 0);
        assert_eq!(
            store.snapshot().unwrap().users[&ANA].workouts_this_week,
            5
        );
    }

    #[test]
    fn stakes_default_and_update() {
        let (mut tracker, store) = paired_tracker();
        assert_eq!(tracker.stakes(), STAKES_NOT_SET);

        tracker.set_stakes("loser buys dinner").unwrap();

        assert_eq!(tracker.stakes(), "loser buys dinner");
        assert_eq!(
            store.snapshot().unwrap().stakes.as_deref(),
            Some("loser buys dinner")
        );
    }
}
