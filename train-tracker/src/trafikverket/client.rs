//! Trafikverket open-data HTTP client.
//!
//! The API takes a single POST endpoint: an XML query document selecting
//! `TrainAnnouncement` objects, answered with a JSON envelope. The API
//! key travels inside the query document, not in a header.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{AnnouncementEvent, TrainId};

use super::AnnouncementSource;
use super::convert::convert_announcements;
use super::error::ApiError;
use super::types::Envelope;

/// Default endpoint for the Trafikverket open data API.
const DEFAULT_BASE_URL: &str = "https://api.trafikinfo.trafikverket.se/v2/data.json";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Trafikverket client.
#[derive(Debug, Clone)]
pub struct TrafikverketConfig {
    /// API key for authentication
    pub api_key: String,
    /// Endpoint URL (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TrafikverketConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Trafikverket open-data API client.
///
/// Fetches the flat announcement list for one train. Uses a semaphore to
/// limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TrafikverketClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl TrafikverketClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TrafikverketConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Build the XML query document for one train on one date.
    ///
    /// Both filter values are validated domain types, so no XML escaping
    /// is needed for them; the API key is an opaque token issued by
    /// Trafikverket and never contains markup.
    fn query_document(&self, train: &TrainId, date: NaiveDate) -> String {
        format!(
            concat!(
                "<REQUEST>",
                "<LOGIN authenticationkey=\"{key}\" />",
                "<QUERY objecttype=\"TrainAnnouncement\" schemaversion=\"1.8\">",
                "<FILTER><AND>",
                "<EQ name=\"AdvertisedTrainIdent\" value=\"{train}\" />",
                "<EQ name=\"ScheduledDepartureDateTime\" value=\"{date}\" />",
                "</AND></FILTER>",
                "</QUERY>",
                "</REQUEST>"
            ),
            key = self.api_key,
            train = train.as_str(),
            date = date.format("%Y-%m-%d"),
        )
    }

    /// Fetch all announcements for one train on one date.
    ///
    /// Unconvertible announcements are skipped; an unknown train returns
    /// an empty list, not an error.
    pub async fn announcements(
        &self,
        train: &TrainId,
        date: NaiveDate,
    ) -> Result<Arc<Vec<AnnouncementEvent>>, ApiError> {
        let _permit = self.semaphore.acquire().await.map_err(|_| ApiError::Api {
            status: 0,
            message: "Semaphore closed".to_string(),
        })?;

        let response = self
            .http
            .post(&self.base_url)
            .header("Content-Type", "text/xml")
            .body(self.query_document(train, date))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let announcements: Vec<_> = envelope
            .response
            .result
            .into_iter()
            .flat_map(|r| r.train_announcements)
            .collect();

        debug!(
            train = %train,
            count = announcements.len(),
            "fetched announcements"
        );

        Ok(Arc::new(convert_announcements(train, &announcements)))
    }
}

impl AnnouncementSource for TrafikverketClient {
    fn announcements(
        &self,
        train: &TrainId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Arc<Vec<AnnouncementEvent>>, ApiError>> + Send {
        TrafikverketClient::announcements(self, train, date)
    }
}
