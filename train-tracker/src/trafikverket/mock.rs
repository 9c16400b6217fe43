//! Mock announcement source for testing without API access.
//!
//! Serves canned announcement lists keyed by train ID, as if they were
//! live API responses. Lists can be swapped at runtime to simulate the
//! feed evolving between polls.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::{AnnouncementEvent, TrainId};

use super::AnnouncementSource;
use super::error::ApiError;

/// Mock announcement source backed by an in-memory table.
#[derive(Clone, Default)]
pub struct MockAnnouncementClient {
    /// Pre-loaded announcement lists, keyed by train ID.
    trains: Arc<RwLock<HashMap<TrainId, Arc<Vec<AnnouncementEvent>>>>>,
}

impl MockAnnouncementClient {
    /// Create an empty mock; every train is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the announcement list for a train.
    pub async fn set_announcements(&self, train: TrainId, events: Vec<AnnouncementEvent>) {
        let mut trains = self.trains.write().await;
        trains.insert(train, Arc::new(events));
    }

    /// Remove a train entirely; subsequent fetches return empty.
    pub async fn clear(&self, train: &TrainId) {
        let mut trains = self.trains.write().await;
        trains.remove(train);
    }

    async fn fetch(&self, train: &TrainId) -> Arc<Vec<AnnouncementEvent>> {
        let trains = self.trains.read().await;

        // Unknown trains yield an empty list, matching the real API
        trains
            .get(train)
            .cloned()
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }
}

impl AnnouncementSource for MockAnnouncementClient {
    fn announcements(
        &self,
        train: &TrainId,
        _date: NaiveDate,
    ) -> impl Future<Output = Result<Arc<Vec<AnnouncementEvent>>, ApiError>> + Send {
        let this = self.clone();
        let train = train.clone();
        async move { Ok(this.fetch(&train).await) }
    }
}
