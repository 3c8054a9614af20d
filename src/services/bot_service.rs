//! Command dispatcher: routes inbound events to the rollover engine and the roster, and relays
//! replies and partner notifications through a [`Messenger`].

use time::PrimitiveDateTime;
use tracing::{debug, warn};

use crate::{
    dao::models::UserId,
    dto::{
        format_iso,
        inbound::{Command, InboundEvent, Payload},
        validation::{parse_goal_argument, parse_stakes_argument},
    },
    error::ServiceError,
    services::{
        messages::{self, ProgressView},
        messenger::Messenger,
        notifications,
    },
    state::{
        RosterError, SharedState, WeeklyTracker,
        rollover::{self, current_week_start},
    },
};

/// Argument of `/test_reset` that triggers the reset instead of showing diagnostics.
const FORCE_RESET_ARG: &str = "force";

/// Per-event context shared by the command handlers.
struct CommandContext<'a> {
    messenger: &'a dyn Messenger,
    event: &'a InboundEvent,
    now: PrimitiveDateTime,
}

impl CommandContext<'_> {
    fn user_id(&self) -> UserId {
        self.event.sender.id
    }

    /// Reply in the chat the event came from.
    async fn reply(&self, text: String) {
        let chat_id = self.event.origin.chat_id;
        if let Err(err) = self.messenger.send(chat_id, text).await {
            warn!(chat_id, error = %err, "failed to send reply");
        }
    }
}

/// Handle one inbound event at the current time.
pub async fn handle_event(
    state: &SharedState,
    messenger: &dyn Messenger,
    event: InboundEvent,
) -> Result<(), ServiceError> {
    handle_event_at(state, messenger, event, rollover::now()).await
}

/// Handle one inbound event as if it arrived at `now`.
///
/// The tracker lock is held until every reply and notification for the event was attempted.
pub async fn handle_event_at(
    state: &SharedState,
    messenger: &dyn Messenger,
    event: InboundEvent,
    now: PrimitiveDateTime,
) -> Result<(), ServiceError> {
    if matches!(event.payload, Payload::Other) {
        return Ok(());
    }

    let ctx = CommandContext {
        messenger,
        event: &event,
        now,
    };

    if !state
        .config()
        .is_whitelisted(event.sender.username.as_deref())
    {
        reject(&ctx).await;
        return Ok(());
    }

    let mut tracker = state.tracker().lock().await;
    match &event.payload {
        Payload::Command { command, args } => match command {
            Command::Start => start(&mut tracker, &ctx).await,
            Command::SetGoal => set_goal(&mut tracker, &ctx, args).await,
            Command::SetStakes => set_stakes(&mut tracker, &ctx, args).await,
            Command::Progress => progress(&mut tracker, &ctx).await,
            Command::TestReset => test_reset(&mut tracker, &ctx, args).await,
            Command::MyId => {
                ctx.reply(messages::whoami(&event.sender)).await;
                Ok(())
            }
            Command::Unknown(name) => {
                debug!(command = %name, "unknown command");
                ctx.reply(messages::unknown_command()).await;
                Ok(())
            }
        },
        Payload::VideoNote => log_workout(&mut tracker, &ctx).await,
        Payload::Other => Ok(()),
    }
}

/// Answer a sender outside the whitelist. Only `/start` gets a visible answer.
async fn reject(ctx: &CommandContext<'_>) {
    let sender = &ctx.event.sender;
    if matches!(
        ctx.event.payload,
        Payload::Command {
            command: Command::Start,
            ..
        }
    ) {
        warn!(
            user_id = %sender.id,
            first_name = sender.name_or("Champion"),
            username = sender.username.as_deref().unwrap_or("<none>"),
            "unauthorized access attempt"
        );
        ctx.reply(messages::access_denied(sender.username.as_deref()))
            .await;
    } else {
        debug!(user_id = %sender.id, "ignoring event from user outside the whitelist");
    }
}

/// Apply a pending rollover and deliver the new-week notifications it raised.
async fn refresh_week(
    tracker: &mut WeeklyTracker,
    ctx: &CommandContext<'_>,
) -> Result<(), ServiceError> {
    tracker.check_and_reset(ctx.now)?;
    if tracker.needs_week_notification() {
        notifications::send_new_week_notifications(tracker, ctx.messenger).await?;
    }
    Ok(())
}

/// Reply with the "start first" hint when the sender holds no seat.
async fn ensure_registered(tracker: &WeeklyTracker, ctx: &CommandContext<'_>) -> bool {
    if tracker.exists(ctx.user_id()) {
        return true;
    }
    ctx.reply(messages::not_registered()).await;
    false
}

async fn start(tracker: &mut WeeklyTracker, ctx: &CommandContext<'_>) -> Result<(), ServiceError> {
    refresh_week(tracker, ctx).await?;

    let user_id = ctx.user_id();
    let name = ctx.event.sender.name_or("Champion");
    if tracker.exists(user_id) {
        ctx.reply(messages::welcome_back(name)).await;
        return Ok(());
    }

    match tracker.register(user_id, name) {
        Ok(()) => {}
        Err(RosterError::Full) => {
            debug!(%user_id, "registration rejected; roster full");
            ctx.reply(messages::roster_full(name)).await;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    match tracker.partner_of(user_id) {
        Some(partner) => {
            ctx.reply(messages::paired_up(name)).await;
            notifications::notify_partner(ctx.messenger, partner, messages::partner_joined(name))
                .await;
        }
        None => ctx.reply(messages::waiting_for_partner(name)).await,
    }
    Ok(())
}

async fn set_goal(
    tracker: &mut WeeklyTracker,
    ctx: &CommandContext<'_>,
    args: &[String],
) -> Result<(), ServiceError> {
    refresh_week(tracker, ctx).await?;
    if !ensure_registered(tracker, ctx).await {
        return Ok(());
    }

    let user_id = ctx.user_id();
    let goal = match parse_goal_argument(args.first().map(String::as_str)) {
        Ok(goal) => goal,
        Err(err) => {
            debug!(%user_id, code = %err.code, "malformed goal argument");
            ctx.reply(messages::goal_usage()).await;
            return Ok(());
        }
    };

    match tracker.set_goal(user_id, goal) {
        Ok(()) => {}
        Err(RosterError::GoalOutOfRange { goal }) => {
            debug!(%user_id, goal, "goal out of range");
            ctx.reply(messages::goal_out_of_range()).await;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    let workouts_done = tracker
        .user(user_id)
        .map(|record| record.workouts_this_week)
        .unwrap_or_default();
    ctx.reply(messages::goal_set(goal, workouts_done)).await;

    if let Some(partner) = tracker.partner_of(user_id) {
        let partner_goal = tracker
            .user(partner)
            .map(|record| record.weekly_goal)
            .unwrap_or_default();
        let name = ctx.event.sender.name_or("Champion");
        notifications::notify_partner(
            ctx.messenger,
            partner,
            messages::partner_goal_set(name, goal, partner_goal),
        )
        .await;
    }
    Ok(())
}

async fn set_stakes(
    tracker: &mut WeeklyTracker,
    ctx: &CommandContext<'_>,
    args: &[String],
) -> Result<(), ServiceError> {
    refresh_week(tracker, ctx).await?;
    if !ensure_registered(tracker, ctx).await {
        return Ok(());
    }

    let stakes = match parse_stakes_argument(args) {
        Ok(stakes) => stakes,
        Err(_) => {
            ctx.reply(messages::stakes_usage()).await;
            return Ok(());
        }
    };

    tracker.set_stakes(stakes.clone())?;
    ctx.reply(messages::stakes_set(&stakes)).await;

    if let Some(partner) = tracker.partner_of(ctx.user_id()) {
        notifications::notify_partner(ctx.messenger, partner, messages::partner_stakes_set(&stakes))
            .await;
    }
    Ok(())
}

async fn log_workout(
    tracker: &mut WeeklyTracker,
    ctx: &CommandContext<'_>,
) -> Result<(), ServiceError> {
    refresh_week(tracker, ctx).await?;
    if !ensure_registered(tracker, ctx).await {
        return Ok(());
    }

    let user_id = ctx.user_id();
    if !tracker.user(user_id).is_some_and(|record| record.has_goal()) {
        ctx.reply(messages::goal_required()).await;
        return Ok(());
    }

    let result = tracker.record_workout(user_id)?;
    debug!(
        %user_id,
        workouts_done = result.workouts_done,
        goal = result.goal,
        "workout logged"
    );

    let partner = tracker.partner_of(user_id);
    if let Some(partner) = partner {
        let name = ctx.event.sender.name_or("Your Partner");
        notifications::notify_partner(ctx.messenger, partner, messages::sweatcam(name, &result))
            .await;
        notifications::forward_to_partner(ctx.messenger, partner, ctx.event.origin).await;
    }

    ctx.reply(messages::workout_logged(&result, partner.is_some()))
        .await;
    Ok(())
}

async fn progress(
    tracker: &mut WeeklyTracker,
    ctx: &CommandContext<'_>,
) -> Result<(), ServiceError> {
    refresh_week(tracker, ctx).await?;

    let user_id = ctx.user_id();
    let Some(own) = tracker.user(user_id) else {
        ctx.reply(messages::not_registered()).await;
        return Ok(());
    };
    let partner = tracker
        .partner_of(user_id)
        .and_then(|partner| tracker.user(partner));

    let text = messages::progress(&ProgressView {
        week_start: current_week_start(ctx.now),
        own,
        partner,
        stakes: tracker.stakes(),
    });
    ctx.reply(text).await;
    Ok(())
}

/// Diagnostics for the weekly rollover; `force` runs the reset immediately.
async fn test_reset(
    tracker: &mut WeeklyTracker,
    ctx: &CommandContext<'_>,
    args: &[String],
) -> Result<(), ServiceError> {
    if !ensure_registered(tracker, ctx).await {
        return Ok(());
    }

    let user_id = ctx.user_id();
    if args.first().map(String::as_str) != Some(FORCE_RESET_ARG) {
        let text = messages::reset_info(
            current_week_start(ctx.now),
            tracker.week_start(),
            ctx.now,
        );
        ctx.reply(text).await;
        return Ok(());
    }

    let count = |tracker: &WeeklyTracker| {
        tracker
            .user(user_id)
            .map(|record| record.workouts_this_week)
            .unwrap_or_default()
    };
    let before = count(tracker);
    tracker.force_reset(ctx.now)?;
    let after = count(tracker);
    let week_start = tracker
        .week_start()
        .map(format_iso)
        .unwrap_or_else(|| "Not set".to_string());

    ctx.reply(messages::reset_forced(before, after, &week_start))
        .await;
    notifications::send_new_week_notifications(tracker, ctx.messenger).await?;
    Ok(())
}
