//! Clock-style rendering of a remaining-seconds count.
//!
//! The countdown display is always `MM:SS`. Minutes are not rolled over into
//! hours, so an hour and a bit renders as `61:01`.

/// Formats a number of seconds as `MM:SS`.
///
/// Both fields are zero-padded to two digits. Minutes grow past 59 without
/// wrapping and simply widen once they exceed 99.
///
/// # Examples
///
/// ```rust
/// use countdown_widgets::format::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(59), "00:59");
/// assert_eq!(format_clock(60), "01:00");
/// assert_eq!(format_clock(3661), "61:01");
/// ```
pub fn format_clock(seconds: u64) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_reference_values() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(3661), "61:01");
    }

    #[test]
    fn test_format_clock_pads_single_digits() {
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(599), "09:59");
    }

    #[test]
    fn test_format_clock_minutes_do_not_roll_over() {
        // 100 minutes exactly; the minutes field widens instead of wrapping
        assert_eq!(format_clock(6000), "100:00");
        assert_eq!(format_clock(3600), "60:00");
    }
}
