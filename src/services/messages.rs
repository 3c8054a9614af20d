//! User-facing texts sent by the bot.

use time::{Duration, PrimitiveDateTime};

use crate::{
    config::{MAX_WEEKLY_GOAL, MIN_WEEKLY_GOAL},
    dao::models::UserRecord,
    dto::{format_long_date, format_short_date, format_weekday_date, inbound::Sender},
    state::WorkoutRecordResult,
};

/// Everything `/progress` shows.
#[derive(Debug)]
pub struct ProgressView<'a> {
    /// Monday of the current week.
    pub week_start: PrimitiveDateTime,
    /// The requesting user.
    pub own: &'a UserRecord,
    /// The partner, once both seats are taken.
    pub partner: Option<&'a UserRecord>,
    /// Current stakes text.
    pub stakes: &'a str,
}

/// Reply to `/start` from someone outside the whitelist.
pub fn access_denied(username: Option<&str>) -> String {
    let mut text = String::from("🚫 ACCESS DENIED 🚫\n\nThis is a private gym.\nMembers only! 💪🔒");
    if let Some(username) = username {
        text.push_str(&format!("\n\nYour username: @{username}"));
    }
    text
}

/// Any command except `/start` from a user without a seat.
pub fn not_registered() -> String {
    "⚠️ You need to /start first!".to_string()
}

/// `/start` from a user who already holds a seat.
pub fn welcome_back(name: &str) -> String {
    format!(
        "Welcome back, {name}! 💪\n\n\
         Use /setgoal to set your weekly workout target\n\
         Use /setstakes to set what's on the line!\n\
         Check your progress with /progress"
    )
}

/// First registration; the second seat is still free.
pub fn waiting_for_partner(name: &str) -> String {
    format!(
        "🔥 Hey {name}! You're in!\n\
         Waiting for your workout partner to join...\n\n\
         Once they /start, you can both set your weekly goals!"
    )
}

/// Second registration, sent to the newcomer.
pub fn paired_up(name: &str) -> String {
    format!(
        "🎯 Perfect! {name}, you're paired up!\n\n\
         Here's how it works:\n\
         1️⃣ Both set weekly goals: /setgoal 4\n\
         2️⃣ Set stakes: /setstakes loser buys dinner\n\
         3️⃣ After each workout, send a video bubble (Sweatcam)!\n\
         4️⃣ End of week: Did you both hit your goals? 👀\n\n\
         Let's get it! 💪"
    )
}

/// Sent to the first user once the second one registers.
pub fn partner_joined(name: &str) -> String {
    format!("🤝 {name} just joined! You're paired up.\n\nSet your goal with /setgoal 4 and let's go! 💪")
}

/// Both seats are taken.
pub fn roster_full(name: &str) -> String {
    format!("Sorry {name}, this bot is for a 1-on-1 partnership and it's already full! 🤝")
}

/// `/setgoal` without a usable number.
pub fn goal_usage() -> String {
    "💡 Set your weekly workout goal like this:\n\
     /setgoal 3  (workout 3 times this week)\n\
     /setgoal 5  (workout 5 times this week)"
        .to_string()
}

/// Goal outside the accepted range.
pub fn goal_out_of_range() -> String {
    format!(
        "⚠️ Goal must be between {MIN_WEEKLY_GOAL} and {MAX_WEEKLY_GOAL} workouts per week!"
    )
}

/// Confirms a new goal.
pub fn goal_set(goal: u32, workouts_done: u32) -> String {
    format!(
        "🎯 GOAL SET: {goal} workouts this week!\n\n\
         Current progress: {workouts_done}/{goal}\n\n\
         Send a video bubble after each workout to log it! 💪"
    )
}

/// Tells the partner about a new goal; `partner_goal` is the recipient's own goal.
pub fn partner_goal_set(name: &str, goal: u32, partner_goal: u32) -> String {
    let partner_goal = if partner_goal > 0 {
        partner_goal.to_string()
    } else {
        "Not set yet".to_string()
    };
    format!(
        "🔔 {name} set their goal: {goal} workouts!\n\
         Your goal: {partner_goal}\n\n\
         Time to step up! 🔥"
    )
}

/// `/setstakes` without text.
pub fn stakes_usage() -> String {
    "💡 Set the stakes like this:\n\
     /setstakes loser buys dinner\n\
     /setstakes loser does the dishes\n\
     /setstakes loser buys ice cream\n\n\
     Keep it fun and motivating! 😄"
        .to_string()
}

/// Confirms new stakes.
pub fn stakes_set(stakes: &str) -> String {
    format!(
        "💰 STAKES SET!\n\n\
         📜 {stakes}\n\n\
         If you both hit your goals: Nothing happens! 🎉\n\
         If someone misses: Time to pay up! 😅\n\n\
         Let the games begin! 🔥"
    )
}

/// Tells the partner about new stakes.
pub fn partner_stakes_set(stakes: &str) -> String {
    format!("💰 Stakes have been set:\n\n📜 {stakes}\n\nGame on! 🔥")
}

/// A workout was sent before any goal was set.
pub fn goal_required() -> String {
    "⚠️ Set your weekly goal first using /setgoal\n\nExample: /setgoal 4".to_string()
}

/// Announces a logged workout to the partner, ahead of the forwarded video.
pub fn sweatcam(name: &str, result: &WorkoutRecordResult) -> String {
    let status = if result.workouts_done >= result.goal {
        "🎉 GOAL REACHED!"
    } else {
        "⏳ Still grinding..."
    };
    format!(
        "📸 SWEATCAM from {name}!\n\n\
         💪 Their progress: {}/{} workouts\n\
         {status}\n\n\
         Check out their proof! 👀",
        result.workouts_done, result.goal
    )
}

/// Confirmation for the user who logged the workout.
pub fn workout_logged(result: &WorkoutRecordResult, partner_notified: bool) -> String {
    let partner = if partner_notified {
        "Partner notified! 🔔"
    } else {
        "No partner yet, flying solo for now."
    };
    let congrats = if result.goal_just_reached {
        "\n\n🎉 YOU HIT YOUR WEEKLY GOAL! 🎉\nKeep the streak going!".to_string()
    } else if result.workouts_done > result.goal {
        format!("\n\n🔥 CRUSHING IT! That's {} workouts!", result.workouts_done)
    } else {
        String::new()
    };
    format!(
        "✅ WORKOUT LOGGED! 💪\n\n\
         This week: {}/{} workouts\n\
         {partner}{congrats}",
        result.workouts_done, result.goal
    )
}

fn goal_display(record: &UserRecord) -> String {
    if record.has_goal() {
        record.weekly_goal.to_string()
    } else {
        "?".to_string()
    }
}

fn goal_status(record: &UserRecord) -> &'static str {
    if record.goal_reached() {
        "✅ Goal reached!"
    } else {
        "⏳ Keep going!"
    }
}

/// The `/progress` report.
pub fn progress(view: &ProgressView<'_>) -> String {
    let week_end = view.week_start + Duration::days(6);
    let mut text = format!(
        "📊 THIS WEEK'S PROGRESS\n\
         📅 {} - {}\n\n\
         YOU:\n\
         💪 {}/{} workouts\n\
         {}\n\n",
        format_short_date(view.week_start),
        format_short_date(week_end),
        view.own.workouts_this_week,
        goal_display(view.own),
        goal_status(view.own),
    );

    if let Some(partner) = view.partner {
        text.push_str(&format!(
            "{}:\n💪 {}/{} workouts\n{}\n\n",
            partner.name.to_uppercase(),
            partner.workouts_this_week,
            goal_display(partner),
            goal_status(partner),
        ));
    }

    text.push_str(&format!(
        "💰 Stakes: {}\n\n\
         Commands:\n\
         /setgoal [number] - Set weekly goal\n\
         /setstakes [text] - Set stakes\n\
         Send bubble video - Log workout!",
        view.stakes
    ));
    text
}

/// Broadcast after a weekly reset.
pub fn new_week(week_start: Option<PrimitiveDateTime>, goal: u32) -> String {
    let week = week_start
        .map(|start| format!("Week of {}", format_long_date(start)))
        .unwrap_or_else(|| "A fresh week".to_string());
    let mut text = format!(
        "🗓️ NEW WEEK STARTED! 🗓️\n\n{week}\n\nYour workouts have been reset to 0.\n"
    );
    if goal > 0 {
        text.push_str(&format!(
            "\n💪 Your goal: {goal} workouts\n\n\
             Want to change it? Use /setgoal\n\
             Time to crush it! 🔥"
        ));
    } else {
        text.push_str(
            "\n⚠️ You haven't set a goal yet!\n\n\
             Use /setgoal [number] to set your weekly target\n\
             Example: /setgoal 4",
        );
    }
    text
}

/// `/test_reset` diagnostics.
pub fn reset_info(
    current_week_start: PrimitiveDateTime,
    stored_week_start: Option<PrimitiveDateTime>,
    now: PrimitiveDateTime,
) -> String {
    let stored = stored_week_start
        .map(format_weekday_date)
        .unwrap_or_else(|| "Not set".to_string());
    let days_until_reset = stored_week_start
        .map(|start| (7 - (now - start).whole_days()).to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    format!(
        "🧪 WEEKLY RESET TEST INFO\n\n\
         📅 Current week starts: {}\n\
         📅 Stored week start: {stored}\n\
         ⏰ Days until Monday reset: {days_until_reset}\n\n\
         💡 To test reset:\n\
         /test_reset force - Force a reset now\n\
         /test_reset info - Show this info",
        format_weekday_date(current_week_start)
    )
}

/// Result of `/test_reset force`.
pub fn reset_forced(before: u32, after: u32, week_start: &str) -> String {
    format!(
        "✅ RESET FORCED!\n\n\
         Before: {before} workouts\n\
         After: {after} workouts\n\n\
         Week start updated to: {week_start}\n\n\
         Use /progress to see reset data"
    )
}

/// `/myid` answer, with whitelist hints.
pub fn whoami(sender: &Sender) -> String {
    let name = sender.name_or("Unknown");
    let user_id = sender.id;
    match sender.username.as_deref() {
        Some(username) => format!(
            "ℹ️ YOUR TELEGRAM INFO\n\n\
             Username: @{username}\n\
             Name: {name}\n\
             User ID: {user_id}\n\n\
             💡 To whitelist, add this to .env file:\n\
             WHITELIST={username}\n\n\
             Or for multiple users:\n\
             WHITELIST={username},otheruser"
        ),
        None => format!(
            "⚠️ YOU DON'T HAVE A USERNAME!\n\n\
             Name: {name}\n\
             User ID: {user_id}\n\n\
             The whitelist matches usernames, so you need to:\n\
             1. Go to Telegram Settings\n\
             2. Edit Profile\n\
             3. Set a Username"
        ),
    }
}

/// Help text for unrecognised commands.
pub fn unknown_command() -> String {
    "❓ Unknown command!\n\n\
     📋 Available Commands:\n\n\
     /start - Register and join\n\
     /setgoal [number] - Set weekly workout goal\n\
     \u{20} Example: /setgoal 4\n\n\
     /setstakes [text] - Set what's at stake\n\
     \u{20} Example: /setstakes loser buys dinner\n\n\
     /progress - Check this week's progress\n\n\
     /myid - Get your Telegram ID\n\n\
     📸 Send a video bubble after each workout to log it!"
        .to_string()
}
