use chrono::Duration;

/// Format an offset as `H:MM:SS`, truncated to whole seconds, with a leading
/// `-` when negative.
pub fn format_td(duration: Duration) -> String {
    let negative = duration < Duration::zero();
    let secs = duration.num_seconds().unsigned_abs();
    let (mins, secs) = (secs / 60, secs % 60);
    let (hours, mins) = (mins / 60, mins % 60);

    let text = format!("{}:{:02}:{:02}", hours, mins, secs);
    if negative { format!("-{}", text) } else { text }
}

/// Like [`format_td`], empty when the offset is unknown.
pub fn format_optional_td(duration: Option<Duration>) -> String {
    duration.map(format_td).unwrap_or_default()
}
