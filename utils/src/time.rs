//! Time formatting helpers.

/// Format a duration in seconds to a human-readable string.
///
/// Used in log lines for boost windows, where `14d 0h` reads better than
/// `1209600`.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(1_209_600), "14d 0h");
    }
}
