//! Derived session statistics. All functions here are pure: the session
//! keeps raw counters and the clock, everything displayable is computed
//! from those on read.

/// Words per minute, with the usual five-characters-per-word convention.
/// Zero elapsed time yields zero rather than a division by zero.
pub fn wpm(correct_count: usize, elapsed_secs: u64) -> u64 {
    if elapsed_secs == 0 {
        return 0;
    }
    let words = correct_count as f64 / 5.0;
    let minutes = elapsed_secs as f64 / 60.0;
    (words / minutes).round() as u64
}

/// Percentage of typed-character events that matched the passage.
/// An untouched session reads as 100%.
pub fn accuracy(correct_count: usize, error_count: usize) -> u64 {
    let total = correct_count + error_count;
    if total == 0 {
        return 100;
    }
    (correct_count as f64 / total as f64 * 100.0).round() as u64
}

/// `MM:SS`, zero-padded; minutes keep growing past 59.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm_zero_elapsed_is_zero() {
        assert_eq!(wpm(0, 0), 0);
        assert_eq!(wpm(250, 0), 0);
    }

    #[test]
    fn test_wpm_basic() {
        // 50 chars in 60s = 10 words/min
        assert_eq!(wpm(50, 60), 10);
        // 25 chars in 30s = 5 words in half a minute = 10 wpm
        assert_eq!(wpm(25, 30), 10);
        assert_eq!(wpm(5, 60), 1);
    }

    #[test]
    fn test_wpm_rounds() {
        // 7 chars in 60s = 1.4 words/min, rounds down
        assert_eq!(wpm(7, 60), 1);
        // 8 chars in 60s = 1.6 words/min, rounds up
        assert_eq!(wpm(8, 60), 2);
    }

    #[test]
    fn test_accuracy_no_input_is_perfect() {
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn test_accuracy_basic() {
        assert_eq!(accuracy(10, 0), 100);
        assert_eq!(accuracy(1, 1), 50);
        assert_eq!(accuracy(3, 1), 75);
        assert_eq!(accuracy(0, 5), 0);
    }

    #[test]
    fn test_accuracy_rounds() {
        // 2/3 = 66.66..% rounds to 67
        assert_eq!(accuracy(2, 1), 67);
        // 1/3 = 33.33..% rounds to 33
        assert_eq!(accuracy(1, 2), 33);
    }

    #[test]
    fn test_format_time_padding() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(65), "01:05");
    }

    #[test]
    fn test_format_time_minutes_unbounded() {
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(6000 * 60 + 7), "6000:07");
    }

    #[test]
    fn test_pure_and_deterministic() {
        assert_eq!(wpm(42, 37), wpm(42, 37));
        assert_eq!(accuracy(42, 37), accuracy(42, 37));
        assert_eq!(format_time(4237), format_time(4237));
    }
}
