//! Validation helpers for command arguments.

use validator::ValidationError;

/// Parses the `/setgoal` argument into a number.
///
/// Only plain ASCII digits are accepted; the allowed range is enforced by the roster.
/// Digit strings too large for `u32` saturate so they are reported as out of range rather
/// than malformed.
///
/// # Examples
///
/// ```ignore
/// parse_goal_argument(Some("4"))    // Ok(4)
/// parse_goal_argument(Some("four")) // Err - not a number
/// parse_goal_argument(None)         // Err - missing
/// ```
pub fn parse_goal_argument(arg: Option<&str>) -> Result<u32, ValidationError> {
    let Some(arg) = arg else {
        let mut err = ValidationError::new("goal_missing");
        err.message = Some("a weekly goal is required".into());
        return Err(err);
    };

    if arg.is_empty() || !arg.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("goal_format");
        err.message = Some(format!("`{arg}` is not a whole number").into());
        return Err(err);
    }

    Ok(arg.parse::<u32>().unwrap_or(u32::MAX))
}

/// Joins the `/setstakes` arguments into the stakes text.
pub fn parse_stakes_argument(args: &[String]) -> Result<String, ValidationError> {
    let stakes = args.join(" ");
    if stakes.trim().is_empty() {
        let mut err = ValidationError::new("stakes_missing");
        err.message = Some("stakes text is required".into());
        return Err(err);
    }
    Ok(stakes)
}
