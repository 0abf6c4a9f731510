use chrono::Duration;

/// Parse a relative send delay such as `"+2 days"` or `"Day 3 (+48 hours)"`.
///
/// The first `+N unit` run wins. Units are `minute`, `hour`, or `day` (plurals and
/// case variations accepted); anything else means "send now".
pub fn parse_send_delay(raw: &str) -> Duration {
    let lowered = raw.to_ascii_lowercase();
    lowered
        .match_indices('+')
        .find_map(|(index, _)| parse_at(&lowered[index + 1..]))
        .unwrap_or_else(Duration::zero)
}

fn parse_at(rest: &str) -> Option<Duration> {
    let digits_len = rest.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let amount: i64 = rest[..digits_len].parse().ok()?;
    let unit = rest[digits_len..].trim_start();

    if unit.starts_with("day") {
        Duration::try_days(amount)
    } else if unit.starts_with("hour") {
        Duration::try_hours(amount)
    } else if unit.starts_with("minute") {
        Duration::try_minutes(amount)
    } else {
        None
    }
}
