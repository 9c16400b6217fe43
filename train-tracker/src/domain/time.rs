//! Timestamp handling for train announcements.
//!
//! The announcement feed carries times as ISO 8601 strings with a UTC
//! offset ("2024-01-01T10:00:00+01:00"). Timestamps are parsed leniently:
//! a malformed field is treated as absent, never as an error, because
//! partial route data is more useful than no route data.

use chrono::{DateTime, Duration, FixedOffset};
use std::fmt;

/// Parse an ISO 8601 timestamp with offset.
///
/// Returns `None` for anything unparseable. This is deliberate: a single
/// malformed time field must not poison the rest of the assembly.
///
/// # Examples
///
/// ```
/// use train_tracker::domain::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-01T10:00:00+01:00").is_some());
/// assert!(parse_timestamp("2024-01-01T10:00:00.000+01:00").is_some());
/// assert!(parse_timestamp("not-a-date").is_none());
/// assert!(parse_timestamp("").is_none());
/// ```
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// A signed delay: the difference between an estimated or actual time
/// and the originally advertised time for the same activity.
///
/// Negative means early. The textual encoding is `±HH:MM:SS` and is
/// display-only; nothing in the crate re-parses it.
///
/// # Examples
///
/// ```
/// use train_tracker::domain::Delay;
///
/// let delay = Delay::between(
///     Some("2024-01-01T10:00:00+01:00"),
///     Some("2024-01-01T10:05:00+01:00"),
/// ).unwrap();
/// assert_eq!(delay.to_string(), "+00:05:00");
/// assert!(delay.is_late());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay(Duration);

impl Delay {
    /// Compute the delay between an advertised time and an estimated or
    /// actual time.
    ///
    /// Returns `None` when either input is missing, when the two raw
    /// strings are textually identical (the common on-time case, checked
    /// before parsing), or when either fails to parse. A textually
    /// different pair that parses to the same instant yields a delay of
    /// exactly zero, which is distinct from "no delay known".
    pub fn between(advertised: Option<&str>, estimated_or_actual: Option<&str>) -> Option<Delay> {
        let advertised = advertised?;
        let estimated = estimated_or_actual?;

        if advertised == estimated {
            return None;
        }

        let advertised = parse_timestamp(advertised)?;
        let estimated = parse_timestamp(estimated)?;

        Some(Delay(estimated.signed_duration_since(advertised)))
    }

    /// Returns the underlying signed duration.
    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Returns the delay in whole minutes (truncated, sign preserved).
    pub fn minutes(&self) -> i64 {
        self.0.num_minutes()
    }

    /// True if the train is running behind schedule.
    pub fn is_late(&self) -> bool {
        self.0 > Duration::zero()
    }

    /// True if the train is running ahead of schedule.
    pub fn is_early(&self) -> bool {
        self.0 < Duration::zero()
    }
}

impl From<Duration> for Delay {
    fn from(d: Duration) -> Self {
        Delay(d)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_seconds();
        let sign = if total < 0 { '-' } else { '+' };
        let abs = total.unsigned_abs();
        let (hours, rem) = (abs / 3600, abs % 3600);
        let (mins, secs) = (rem / 60, rem % 60);
        write!(f, "{sign}{hours:02}:{mins:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_timestamps() {
        let t = parse_timestamp("2024-01-01T10:00:00+01:00").unwrap();
        assert_eq!(t.timestamp(), 1704099600);

        // Fractional seconds, as the feed sometimes sends
        assert!(parse_timestamp("2024-01-01T10:00:00.000+01:00").is_some());

        // UTC offset
        assert!(parse_timestamp("2024-06-15T08:30:00+02:00").is_some());
    }

    #[test]
    fn parse_invalid_timestamps() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("2024-01-01").is_none());
        assert!(parse_timestamp("10:00:00").is_none());
        assert!(parse_timestamp("2024-13-01T10:00:00+01:00").is_none());
    }

    #[test]
    fn delay_positive() {
        let delay = Delay::between(
            Some("2024-01-01T10:00:00+01:00"),
            Some("2024-01-01T10:05:00+01:00"),
        )
        .unwrap();

        assert_eq!(delay.to_string(), "+00:05:00");
        assert_eq!(delay.minutes(), 5);
        assert!(delay.is_late());
        assert!(!delay.is_early());
    }

    #[test]
    fn delay_negative() {
        let delay = Delay::between(
            Some("2024-01-01T10:05:00+01:00"),
            Some("2024-01-01T10:00:00+01:00"),
        )
        .unwrap();

        assert_eq!(delay.to_string(), "-00:05:00");
        assert_eq!(delay.minutes(), -5);
        assert!(delay.is_early());
        assert!(!delay.is_late());
    }

    #[test]
    fn delay_none_when_missing() {
        assert!(Delay::between(None, Some("2024-01-01T10:00:00+01:00")).is_none());
        assert!(Delay::between(Some("2024-01-01T10:00:00+01:00"), None).is_none());
        assert!(Delay::between(None, None).is_none());
    }

    #[test]
    fn delay_none_when_textually_equal() {
        let t = "2024-01-01T10:00:00+01:00";
        assert!(Delay::between(Some(t), Some(t)).is_none());
    }

    #[test]
    fn delay_none_when_unparseable() {
        assert!(Delay::between(Some("garbage"), Some("2024-01-01T10:00:00+01:00")).is_none());
        assert!(Delay::between(Some("2024-01-01T10:00:00+01:00"), Some("garbage")).is_none());
    }

    #[test]
    fn delay_zero_when_same_instant_different_text() {
        // Same instant written with different offsets: textually different,
        // so a delay of exactly zero is reported.
        let delay = Delay::between(
            Some("2024-01-01T10:00:00+01:00"),
            Some("2024-01-01T09:00:00+00:00"),
        )
        .unwrap();

        assert_eq!(delay.duration(), Duration::zero());
        assert_eq!(delay.to_string(), "+00:00:00");
        assert!(!delay.is_late());
        assert!(!delay.is_early());
    }

    #[test]
    fn delay_spans_hours() {
        let delay = Delay::between(
            Some("2024-01-01T10:00:00+01:00"),
            Some("2024-01-01T11:30:15+01:00"),
        )
        .unwrap();

        assert_eq!(delay.to_string(), "+01:30:15");
    }

    #[test]
    fn delay_across_offsets() {
        // 10:00+01:00 is 09:00 UTC; 09:10+00:00 is ten minutes later.
        let delay = Delay::between(
            Some("2024-01-01T10:00:00+01:00"),
            Some("2024-01-01T09:10:00+00:00"),
        )
        .unwrap();

        assert_eq!(delay.minutes(), 10);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_timestamp()(
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
        ) -> String {
            format!("2024-03-15T{hour:02}:{minute:02}:{second:02}+01:00")
        }
    }

    proptest! {
        /// Any generated ISO 8601 timestamp parses
        #[test]
        fn valid_timestamps_parse(s in valid_timestamp()) {
            prop_assert!(parse_timestamp(&s).is_some());
        }

        /// Swapping the two inputs negates the delay
        #[test]
        fn delay_antisymmetric(a in valid_timestamp(), b in valid_timestamp()) {
            let forward = Delay::between(Some(&a), Some(&b));
            let backward = Delay::between(Some(&b), Some(&a));

            match (forward, backward) {
                (Some(f), Some(bk)) => {
                    prop_assert_eq!(f.duration(), -bk.duration());
                }
                (None, None) => {
                    // Only when textually equal
                    prop_assert_eq!(&a, &b);
                }
                _ => prop_assert!(false, "asymmetric None: {:?} vs {:?}", forward, backward),
            }
        }

        /// The encoding always starts with a sign and has HH:MM:SS shape
        #[test]
        fn encoding_shape(a in valid_timestamp(), b in valid_timestamp()) {
            if let Some(delay) = Delay::between(Some(&a), Some(&b)) {
                let s = delay.to_string();
                prop_assert!(s.starts_with('+') || s.starts_with('-'));
                prop_assert_eq!(s.len(), 9);
                prop_assert_eq!(&s[3..4], ":");
                prop_assert_eq!(&s[6..7], ":");
            }
        }

        /// Sign of the encoding matches the sign of the duration
        #[test]
        fn encoding_sign_consistent(a in valid_timestamp(), b in valid_timestamp()) {
            if let Some(delay) = Delay::between(Some(&a), Some(&b)) {
                let s = delay.to_string();
                if delay.is_early() {
                    prop_assert!(s.starts_with('-'));
                } else {
                    prop_assert!(s.starts_with('+'));
                }
            }
        }

        /// Arbitrary garbage input never panics
        #[test]
        fn garbage_degrades(s in "[a-z :0-9-]{0,30}") {
            let _ = Delay::between(Some(&s), Some("2024-03-15T10:00:00+01:00"));
            let _ = parse_timestamp(&s);
        }
    }
}
