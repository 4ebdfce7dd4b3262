use chrono::{DateTime, Utc};

/// Format the time spent between two instants as `"{m}m {s}s"`.
///
/// Negative spans (clock skew) collapse to zero.
#[must_use]
pub fn format_elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().max(0);
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use coach_core::time::fixed_now;

    #[test]
    fn elapsed_formats_minutes_and_seconds() {
        let start = fixed_now();
        assert_eq!(format_elapsed(start, start + Duration::seconds(754)), "12m 34s");
        assert_eq!(format_elapsed(start, start + Duration::seconds(59)), "0m 59s");
    }

    #[test]
    fn negative_elapsed_collapses_to_zero() {
        let start = fixed_now();
        assert_eq!(format_elapsed(start, start - Duration::seconds(5)), "0m 0s");
    }
}
