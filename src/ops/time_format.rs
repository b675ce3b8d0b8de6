use std::time::Duration;

/// Formats a position as `m:ss`, truncating fractional seconds.
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parses a catalog duration label such as `3:42`.
/// Returns None unless the label is `minutes:seconds` with seconds below 60.
pub fn parse_duration_label(label: &str) -> Option<Duration> {
    let (minutes, seconds) = label.trim().split_once(':')?;
    if seconds.len() != 2 {
        return None;
    }
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    let total = minutes.checked_mul(60)?.checked_add(seconds)?;
    Some(Duration::from_secs(total))
}
