//! Formatting helpers for the terminal view.

/// Renders a duration in seconds as zero-padded `HH:MM:SS`.
///
/// Zero and negative durations render as `"00:00:00"`. The hour field
/// widens past two digits rather than wrapping, so 25 hours is `"25:00:00"`
/// and 100+ hours simply grows.
pub fn format_elapsed(seconds: i64) -> String {
    if seconds <= 0 {
        return "00:00:00".to_string();
    }
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Formats a ratio as a percentage with one decimal place.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_zero_and_negative() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(-5), "00:00:00");
    }

    #[test]
    fn elapsed_within_a_day() {
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(3661), "01:01:01");
        assert_eq!(format_elapsed(86399), "23:59:59");
    }

    #[test]
    fn elapsed_hours_widen_past_two_digits() {
        assert_eq!(format_elapsed(90000), "25:00:00");
        assert_eq!(format_elapsed(360_000), "100:00:00");
    }

    #[test]
    fn percent_one_decimal() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(0.256), "25.6%");
        assert_eq!(format_percent(1.0), "100.0%");
    }
}
