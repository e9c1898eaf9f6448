/// Format a chart time (UTC seconds) as `HH:MM:SS`, or `HH:MM` when
/// seconds are hidden.
pub fn format_time_label(time_secs: u64, show_seconds: bool) -> String {
    let of_day = time_secs % 86_400;
    let (hours, minutes, seconds) = (of_day / 3600, of_day % 3600 / 60, of_day % 60);
    if show_seconds {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}")
    }
}
