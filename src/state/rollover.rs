//! Weekly rollover: detecting week boundaries lazily on access and resetting the counters.

use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tracing::{info, warn};

use crate::dao::{
    models::{BotState, UserId},
    storage::StorageResult,
};

use super::tracker::WeeklyTracker;

/// Result of comparing the stored week against the week `now` falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// Nothing was tracked yet; start tracking `week_start` without resetting anything.
    Bootstrap {
        /// Monday the tracking begins with.
        week_start: PrimitiveDateTime,
    },
    /// At least one Monday passed since `from`; skipped weeks collapse into this single step.
    NewWeek {
        /// Previously stored week start.
        from: PrimitiveDateTime,
        /// Week start of `now`.
        to: PrimitiveDateTime,
    },
    /// Still inside the stored week (or the clock went backwards).
    SameWeek,
}

/// Current wall-clock time in UTC, without offset.
pub fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Monday 00:00:00 of the week containing `now`.
pub fn current_week_start(now: PrimitiveDateTime) -> PrimitiveDateTime {
    let days_since_monday = now.weekday().number_days_from_monday();
    (now.date() - Duration::days(days_since_monday.into())).midnight()
}

/// Decide which rollover step applies for the stored week start at instant `now`.
pub fn plan_rollover(stored: Option<PrimitiveDateTime>, now: PrimitiveDateTime) -> Rollover {
    let current = current_week_start(now);
    match stored {
        None => Rollover::Bootstrap {
            week_start: current,
        },
        Some(from) if current > from => Rollover::NewWeek { from, to: current },
        Some(_) => Rollover::SameWeek,
    }
}

impl BotState {
    /// Zero every counter, move to `week_start` and flag the new-week notifications.
    ///
    /// Returns the counts each user had before the reset.
    pub fn reset_week(&mut self, week_start: PrimitiveDateTime) -> Vec<(UserId, u32)> {
        let previous = self
            .users
            .iter_mut()
            .map(|(id, record)| (*id, std::mem::take(&mut record.workouts_this_week)))
            .collect();
        self.week_start = Some(week_start);
        self.needs_week_notification = true;
        previous
    }
}

impl WeeklyTracker {
    /// Apply a pending rollover for `now`. Returns `true` only when counters were reset.
    ///
    /// Called on every inbound interaction; the common case is a no-op without a save.
    pub fn check_and_reset(&mut self, now: PrimitiveDateTime) -> StorageResult<bool> {
        match plan_rollover(self.state.week_start, now) {
            Rollover::Bootstrap { week_start } => {
                info!(week_start = %week_start.date(), "first run; tracking starts this week");
                self.state.week_start = Some(week_start);
                self.persist()?;
                Ok(false)
            }
            Rollover::NewWeek { from, to } => {
                info!(from = %from.date(), to = %to.date(), "new week detected");
                self.apply_reset(to)?;
                Ok(true)
            }
            Rollover::SameWeek => Ok(false),
        }
    }

    /// Run the reset transition regardless of the stored week.
    pub fn force_reset(&mut self, now: PrimitiveDateTime) -> StorageResult<()> {
        warn!("forcing weekly reset");
        self.apply_reset(current_week_start(now))
    }

    /// Whether a reset happened whose notifications were not sent yet.
    pub fn needs_week_notification(&self) -> bool {
        self.state.needs_week_notification
    }

    /// Clear the notification flag once every recipient was attempted.
    pub fn mark_week_notification_sent(&mut self) -> StorageResult<()> {
        self.state.needs_week_notification = false;
        self.persist()
    }

    /// Start of the tracked week, if tracking began.
    pub fn week_start(&self) -> Option<PrimitiveDateTime> {
        self.state.week_start
    }

    fn apply_reset(&mut self, week_start: PrimitiveDateTime) -> StorageResult<()> {
        for (user_id, old_count) in self.state.reset_week(week_start) {
            info!(%user_id, old_count, "workouts reset to 0");
        }
        self.persist()?;
        info!(week_start = %week_start.date(), "new week starts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::state::tracker::test_support::{ANA, BEN, empty_tracker, paired_tracker};

    fn log_workouts(tracker: &mut WeeklyTracker, user: UserId, count: u32) {
        tracker.set_goal(user, 5).unwrap();
        for _ in 0..count {
            tracker.record_workout(user).unwrap();
        }
    }

    #[test]
    fn week_start_is_monday_midnight() {
        assert_eq!(
            current_week_start(datetime!(2025-03-05 17:45:12)),
            datetime!(2025-03-03 0:00)
        );
        assert_eq!(
            current_week_start(datetime!(2025-03-03 0:00)),
            datetime!(2025-03-03 0:00)
        );
        assert_eq!(
            current_week_start(datetime!(2025-03-09 23:59:59)),
            datetime!(2025-03-03 0:00)
        );
        assert_eq!(
            current_week_start(datetime!(2025-03-10 0:00:01)),
            datetime!(2025-03-10 0:00)
        );
    }

    #[test]
    fn week_start_crosses_month_and_year() {
        assert_eq!(
            current_week_start(datetime!(2025-01-01 9:00)),
            datetime!(2024-12-30 0:00)
        );
    }

    #[test]
    fn first_check_bootstraps_without_reset() {
        let (mut tracker, store) = empty_tracker();

        assert!(!tracker.check_and_reset(datetime!(2025-03-05 10:00)).unwrap());
        assert_eq!(tracker.week_start(), Some(datetime!(2025-03-03 0:00)));
        assert!(!tracker.needs_week_notification());
        assert_eq!(
            store.snapshot().unwrap().week_start,
            Some(datetime!(2025-03-03 0:00))
        );
    }

    #[test]
    fn repeated_checks_within_a_week_reset_once() {
        let (mut tracker, _store) = paired_tracker();
        tracker.check_and_reset(datetime!(2025-03-05 10:00)).unwrap();
        log_workouts(&mut tracker, ANA, 2);

        assert!(tracker.check_and_reset(datetime!(2025-03-11 8:00)).unwrap());
        tracker.record_workout(ANA).unwrap();
        assert!(!tracker.check_and_reset(datetime!(2025-03-11 8:00)).unwrap());
        assert!(!tracker.check_and_reset(datetime!(2025-03-16 23:00)).unwrap());

        assert_eq!(tracker.state().users[&ANA].workouts_this_week, 1);
    }

    #[test]
    fn crossing_monday_resets_counters_and_raises_flag() {
        let (mut tracker, store) = paired_tracker();
        tracker.check_and_reset(datetime!(2025-03-05 10:00)).unwrap();
        log_workouts(&mut tracker, ANA, 3);
        log_workouts(&mut tracker, BEN, 1);

        assert!(tracker.check_and_reset(datetime!(2025-03-10 0:00:01)).unwrap());

        let state = tracker.state();
        assert_eq!(state.users[&ANA].workouts_this_week, 0);
        assert_eq!(state.users[&BEN].workouts_this_week, 0);
        assert_eq!(state.users[&ANA].weekly_goal, 5);
        assert_eq!(state.week_start, Some(datetime!(2025-03-10 0:00)));
        assert!(state.needs_week_notification);
        assert_eq!(store.snapshot().as_ref(), Some(state));
    }

    #[test]
    fn long_gap_collapses_into_one_reset_to_current_week() {
        let (mut tracker, _store) = paired_tracker();
        tracker.check_and_reset(datetime!(2025-03-05 10:00)).unwrap();
        log_workouts(&mut tracker, BEN, 4);

        assert!(tracker.check_and_reset(datetime!(2025-04-17 12:00)).unwrap());
        assert_eq!(tracker.week_start(), Some(datetime!(2025-04-14 0:00)));
        assert!(!tracker.check_and_reset(datetime!(2025-04-18 12:00)).unwrap());
    }

    #[test]
    fn clock_going_backwards_never_moves_week_back() {
        let (mut tracker, _store) = empty_tracker();
        tracker.check_and_reset(datetime!(2025-03-12 10:00)).unwrap();

        assert!(!tracker.check_and_reset(datetime!(2025-03-05 10:00)).unwrap());
        assert_eq!(tracker.week_start(), Some(datetime!(2025-03-10 0:00)));
    }

    #[test]
    fn force_reset_ignores_the_calendar() {
        let (mut tracker, _store) = paired_tracker();
        tracker.check_and_reset(datetime!(2025-03-05 10:00)).unwrap();
        log_workouts(&mut tracker, ANA, 2);

        tracker.force_reset(datetime!(2025-03-05 11:00)).unwrap();

        assert_eq!(tracker.state().users[&ANA].workouts_this_week, 0);
        assert_eq!(tracker.week_start(), Some(datetime!(2025-03-03 0:00)));
        assert!(tracker.needs_week_notification());
    }

    #[test]
    fn marking_notifications_sent_clears_flag() {
        let (mut tracker, store) = paired_tracker();
        tracker.force_reset(datetime!(2025-03-05 11:00)).unwrap();

        tracker.mark_week_notification_sent().unwrap();

        assert!(!tracker.needs_week_notification());
        assert!(!store.snapshot().unwrap().needs_week_notification);
    }
}
