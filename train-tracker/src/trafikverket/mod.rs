//! Trafikverket open-data client.
//!
//! This module provides an HTTP client for the Trafikverket open API,
//! which publishes real-time train announcements for the Swedish rail
//! network.
//!
//! Key characteristics of the API:
//! - One POST endpoint taking an XML query document, answering in JSON
//! - One announcement per **activity** (arrival or departure) per
//!   station, flat and unordered; route reconstruction happens in
//!   [`crate::route`]
//! - Times are ISO 8601 with offset; `TimeAtLocation` is only present
//!   once the activity has actually occurred
//! - Unknown trains return an empty result, not an error

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{AnnouncementEvent, TrainId};

pub use client::{TrafikverketClient, TrafikverketConfig};
pub use convert::{ConversionError, convert_announcement, convert_announcements};
pub use error::ApiError;
pub use mock::MockAnnouncementClient;
pub use types::{Description, Envelope, QueryResult, ResponseBody, TrainAnnouncement};

/// Anything that can produce the flat announcement list for one train.
///
/// Implemented by the live client, the caching wrapper, and the mock, so
/// the tracker is agnostic about where its data comes from.
pub trait AnnouncementSource: Send + Sync {
    /// Fetch all announcements for `train` on the given scheduled
    /// departure date.
    fn announcements(
        &self,
        train: &TrainId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Arc<Vec<AnnouncementEvent>>, ApiError>> + Send;
}
