//! Trafikverket API response DTOs.
//!
//! These types map directly to the Trafikverket open-data v2 JSON
//! envelope. Field names are PascalCase on the wire; `Option` is used
//! liberally because the feed omits fields rather than sending nulls.

use serde::Deserialize;

/// Top-level envelope of a data query response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Envelope {
    pub response: ResponseBody,
}

/// The RESPONSE object: one RESULT entry per query in the request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "RESULT")]
    pub result: Vec<QueryResult>,
}

/// One query's worth of results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "TrainAnnouncement", default)]
    pub train_announcements: Vec<TrainAnnouncement>,
}

/// One announcement: a single activity of a train at a station.
///
/// Time fields are left as raw strings; malformed timestamps must
/// degrade downstream rather than fail deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainAnnouncement {
    /// The public train number, e.g. "545".
    pub advertised_train_ident: Option<String>,

    /// "Ankomst" or "Avgang".
    pub activity_type: Option<String>,

    /// Station signature, e.g. "Cst".
    pub location_signature: Option<String>,

    /// Timetabled time at this location (ISO 8601 with offset).
    pub advertised_time_at_location: Option<String>,

    /// Current best estimate, present only when the forecast differs.
    pub estimated_time_at_location: Option<String>,

    /// Actual recorded time; presence means the activity has occurred.
    pub time_at_location: Option<String>,

    /// Track number/letter.
    pub track_at_location: Option<String>,

    pub canceled: Option<bool>,

    pub deleted: Option<bool>,

    /// Service descriptions, e.g. "SJ Regional".
    #[serde(default)]
    pub product_information: Vec<Description>,

    /// Disruption notices, e.g. "Spårändrat".
    #[serde(default)]
    pub deviation: Vec<Description>,
}

/// Wrapper for description-bearing entries (schema version 1.8 style).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Description {
    pub description: Option<String>,
}
