//! Announcement events.
//!
//! An `AnnouncementEvent` is one activity (arrival or departure) of one
//! train at one station, as reported by the rail operator's open-data
//! feed. A journey arrives as a flat, unordered, partially-duplicated
//! stream of these; the route assembler turns them into an itinerary.

use super::{Activity, Signature, TrainId};

/// One activity of one train at one station.
///
/// Time fields are carried as raw wire strings rather than parsed
/// values: the feed occasionally delivers malformed timestamps, and a
/// bad time field must degrade to "unknown" during assembly instead of
/// rejecting the whole event. Parsing happens in the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementEvent {
    /// The journey this announcement belongs to.
    pub train_id: TrainId,
    /// Whether this is the arrival or the departure half of the stop.
    pub activity: Activity,
    /// Station the activity happens at.
    pub location: Signature,
    /// Scheduled timestamp (ISO 8601 with offset), authoritative for ordering.
    pub advertised_time: Option<String>,
    /// Revised timestamp; present and different from advertised implies a delay.
    pub estimated_time: Option<String>,
    /// Recorded once the activity has actually occurred.
    pub actual_time: Option<String>,
    /// Platform/track label.
    pub track: Option<String>,
    /// Whether this activity was canceled.
    pub canceled: bool,
    /// Whether the announcement was deleted upstream.
    pub deleted: bool,
    /// Product descriptions (train composition, brand).
    pub product_info: Vec<String>,
    /// Free-text deviation descriptions.
    pub deviations: Vec<String>,
}

impl AnnouncementEvent {
    /// Creates a new event with the given identity and no times or metadata.
    pub fn new(train_id: TrainId, activity: Activity, location: Signature) -> Self {
        Self {
            train_id,
            activity,
            location,
            advertised_time: None,
            estimated_time: None,
            actual_time: None,
            track: None,
            canceled: false,
            deleted: false,
            product_info: Vec::new(),
            deviations: Vec::new(),
        }
    }

    /// The best revised time for this activity: actual time at location
    /// when recorded, otherwise the estimate.
    pub fn estimated_or_actual(&self) -> Option<&str> {
        self.actual_time
            .as_deref()
            .or(self.estimated_time.as_deref())
    }

    /// True once the activity has actually occurred.
    pub fn has_occurred(&self) -> bool {
        self.actual_time.is_some()
    }
}
