//! Conversion from Trafikverket DTOs to domain types.
//!
//! Announcements that cannot be converted (missing location, malformed
//! signature, unrecognised activity type) are skipped with a warning so
//! that one bad record never takes down the whole result set.

use tracing::warn;

use crate::domain::{Activity, AnnouncementEvent, Signature, TrainId};

use super::types::{Description, TrainAnnouncement};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// The announcement carried no location signature
    #[error("missing location signature")]
    MissingLocation,

    /// The location signature failed validation
    #[error("invalid location signature: {0}")]
    InvalidLocation(String),

    /// The activity type was neither arrival nor departure
    #[error("unrecognised activity type: {0:?}")]
    UnknownActivity(Option<String>),
}

/// Convert a batch of announcements, skipping the unconvertible ones.
pub fn convert_announcements(
    train_id: &TrainId,
    announcements: &[TrainAnnouncement],
) -> Vec<AnnouncementEvent> {
    let mut events = Vec::with_capacity(announcements.len());

    for announcement in announcements {
        match convert_announcement(train_id, announcement) {
            Ok(event) => events.push(event),
            Err(e) => {
                warn!(
                    train = %train_id,
                    location = ?announcement.location_signature,
                    error = %e,
                    "skipping unconvertible announcement"
                );
            }
        }
    }

    events
}

/// Convert a single announcement to a domain event.
pub fn convert_announcement(
    train_id: &TrainId,
    announcement: &TrainAnnouncement,
) -> Result<AnnouncementEvent, ConversionError> {
    let raw_location = announcement
        .location_signature
        .as_deref()
        .ok_or(ConversionError::MissingLocation)?;

    let location = Signature::parse(raw_location)
        .map_err(|_| ConversionError::InvalidLocation(raw_location.to_string()))?;

    let activity = announcement
        .activity_type
        .as_deref()
        .and_then(Activity::from_wire)
        .ok_or_else(|| ConversionError::UnknownActivity(announcement.activity_type.clone()))?;

    let mut event = AnnouncementEvent::new(train_id.clone(), activity, location);
    event.advertised_time = announcement.advertised_time_at_location.clone();
    event.estimated_time = announcement.estimated_time_at_location.clone();
    event.actual_time = announcement.time_at_location.clone();
    event.track = announcement.track_at_location.clone();
    event.canceled = announcement.canceled.unwrap_or(false);
    event.deleted = announcement.deleted.unwrap_or(false);
    event.product_info = descriptions(&announcement.product_information);
    event.deviations = descriptions(&announcement.deviation);

    Ok(event)
}

fn descriptions(entries: &[Description]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|d| d.description.clone())
        .collect()
}
