use tracing::{info, warn};

use crate::{
    dao::{models::UserId, storage::StorageResult},
    dto::inbound::MessageRef,
    services::{messages, messenger::Messenger},
    state::WeeklyTracker,
};

/// Tell every registered user that a new week started, then clear the pending flag.
///
/// Each recipient is attempted once; failures are logged and do not stop the batch. The flag is
/// cleared after the pass whatever the individual outcomes were. Returns how many messages went
/// out.
pub async fn send_new_week_notifications(
    tracker: &mut WeeklyTracker,
    messenger: &dyn Messenger,
) -> StorageResult<usize> {
    if !tracker.needs_week_notification() {
        return Ok(0);
    }

    let week_start = tracker.week_start();
    let mut delivered = 0;
    for user_id in tracker.user_ids() {
        let goal = tracker
            .user(user_id)
            .map(|record| record.weekly_goal)
            .unwrap_or_default();
        match messenger
            .send(user_id.chat_id(), messages::new_week(week_start, goal))
            .await
        {
            Ok(()) => {
                delivered += 1;
                info!(%user_id, "sent new week notification");
            }
            Err(err) => warn!(%user_id, error = %err, "failed to send new week notification"),
        }
    }

    tracker.mark_week_notification_sent()?;
    Ok(delivered)
}

/// Send `text` to a partner, logging instead of failing when it does not arrive.
pub async fn notify_partner(messenger: &dyn Messenger, partner: UserId, text: String) -> bool {
    match messenger.send(partner.chat_id(), text).await {
        Ok(()) => true,
        Err(err) => {
            warn!(%partner, error = %err, "could not notify partner");
            false
        }
    }
}

/// Forward a message to a partner, logging instead of failing when it does not arrive.
pub async fn forward_to_partner(
    messenger: &dyn Messenger,
    partner: UserId,
    message: MessageRef,
) -> bool {
    match messenger.forward(partner.chat_id(), message).await {
        Ok(()) => true,
        Err(err) => {
            warn!(%partner, error = %err, "could not forward message to partner");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::{
        services::messenger::test_support::RecordingMessenger,
        state::tracker::test_support::{ANA, BEN, paired_tracker},
    };

    #[tokio::test]
    async fn nothing_is_sent_without_pending_flag() {
        let (mut tracker, _store) = paired_tracker();
        let messenger = RecordingMessenger::new();

        let sent = send_new_week_notifications(&mut tracker, &messenger)
            .await
            .unwrap();

        assert_eq!(sent, 0);
        assert!(messenger.delivered().is_empty());
    }

    #[tokio::test]
    async fn flag_clears_even_when_a_delivery_fails() {
        let (mut tracker, store) = paired_tracker();
        tracker.set_goal(ANA, 4).unwrap();
        tracker.force_reset(datetime!(2025-03-10 9:00)).unwrap();
        let messenger = RecordingMessenger::with_unreachable(&[BEN.chat_id()]);

        let sent = send_new_week_notifications(&mut tracker, &messenger)
            .await
            .unwrap();

        assert_eq!(sent, 1);
        assert_eq!(messenger.failed(), vec![BEN.chat_id()]);
        assert!(messenger
            .last_text_to(ANA.chat_id())
            .contains("Your goal: 4 workouts"));
        assert!(!tracker.needs_week_notification());
        assert!(!store.snapshot().unwrap().needs_week_notification);
    }
}
