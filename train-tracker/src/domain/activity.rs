//! Activity type for train announcements.

use std::fmt;

/// The kind of activity a single announcement describes: the train
/// arriving at a station, or departing from it.
///
/// The upstream feed uses the Swedish values `"Ankomst"` (arrival) and
/// `"Avgang"` (departure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Arrival,
    Departure,
}

impl Activity {
    /// Parse an activity from its wire value.
    ///
    /// Returns `None` for anything other than `"Ankomst"` or `"Avgang"`,
    /// so callers can skip unknown activity types without failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_tracker::domain::Activity;
    ///
    /// assert_eq!(Activity::from_wire("Ankomst"), Some(Activity::Arrival));
    /// assert_eq!(Activity::from_wire("Avgang"), Some(Activity::Departure));
    /// assert_eq!(Activity::from_wire("Genomfart"), None);
    /// ```
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Ankomst" => Some(Activity::Arrival),
            "Avgang" => Some(Activity::Departure),
            _ => None,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Arrival => f.write_str("arrival"),
            Activity::Departure => f.write_str("departure"),
        }
    }
}
