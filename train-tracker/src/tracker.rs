//! Per-train polling supervisor.
//!
//! A `Tracker` owns one background task that polls the announcement
//! source on a fixed interval, reassembles the itinerary from scratch,
//! and publishes each result as an immutable snapshot through a watch
//! channel. Readers always see a complete snapshot or the previous one,
//! never a partial update.
//!
//! Switching trains is done by dropping the old tracker and building a
//! new one; the old poll task is aborted on drop.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::TrainId;
use crate::position::PositionSample;
use crate::route::{Itinerary, assemble};
use crate::stations::CodeResolver;
use crate::trafikverket::AnnouncementSource;

/// Default time between polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for a tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Time between announcement polls.
    pub poll_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl TrackerConfig {
    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// One published state of one train.
///
/// The snapshot carries the train it was built for, so a consumer that
/// receives a delayed result can check it still matches the train it is
/// currently interested in.
///
/// Every snapshot is rebuilt from scratch out of the current feed;
/// nothing carries over between polls, so a station's `passed` flag can
/// regress if the upstream feed withdraws an actual time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub train: TrainId,
    pub itinerary: Itinerary,
}

impl Snapshot {
    /// The initial state before the first successful poll: the train is
    /// known, its route is not.
    pub fn unknown(train: TrainId) -> Self {
        Self {
            train,
            itinerary: Itinerary::empty(),
        }
    }
}

/// A snapshot combined with the latest live position, for display.
///
/// The overlay never mutates the snapshot; position and itinerary come
/// from independent feeds and are only joined at read time.
#[derive(Debug, Clone)]
pub struct TrainStatus {
    pub snapshot: Arc<Snapshot>,
    pub position: Option<PositionSample>,
}

impl TrainStatus {
    /// Join a snapshot with the latest position sample, if any.
    pub fn with_position(snapshot: Arc<Snapshot>, position: Option<PositionSample>) -> Self {
        Self { snapshot, position }
    }
}

/// Supervisor for one tracked train.
pub struct Tracker {
    rx: watch::Receiver<Arc<Snapshot>>,
    handle: JoinHandle<()>,
}

impl Tracker {
    /// Spawn the poll task for `train` on the given scheduled departure
    /// date.
    ///
    /// The first poll happens immediately; afterwards the task polls on
    /// `config.poll_interval`. A failed poll keeps the previous snapshot
    /// and is retried on the next tick.
    pub fn spawn<S>(
        source: S,
        resolver: CodeResolver,
        train: TrainId,
        date: NaiveDate,
        config: TrackerConfig,
    ) -> Self
    where
        S: AnnouncementSource + 'static,
    {
        let (tx, rx) = watch::channel(Arc::new(Snapshot::unknown(train.clone())));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.poll_interval);

            loop {
                ticker.tick().await;

                match source.announcements(&train, date).await {
                    Ok(events) => {
                        let itinerary = assemble(&events, &resolver);

                        debug!(
                            train = %train,
                            stations = itinerary.len(),
                            passed = itinerary.passed_count(),
                            "publishing snapshot"
                        );

                        tx.send_replace(Arc::new(Snapshot {
                            train: train.clone(),
                            itinerary,
                        }));
                    }
                    Err(e) => {
                        // Keep the previous snapshot; retry next tick
                        warn!(train = %train, error = %e, "poll failed");
                    }
                }
            }
        });

        Self { rx, handle }
    }

    /// Subscribe to snapshot updates.
    ///
    /// The returned receiver sees every published snapshot swap; use
    /// `changed().await` then `borrow_and_update()`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.rx.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<Snapshot> {
        self.rx.borrow().clone()
    }

    /// Stop polling. Idempotent; also happens on drop.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// True while the poll task is alive.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Activity, AnnouncementEvent, Signature};
    use crate::trafikverket::{ApiError, MockAnnouncementClient};

    const TICK: Duration = Duration::from_millis(10);
    const WAIT: Duration = Duration::from_secs(5);

    fn train() -> TrainId {
        TrainId::parse("545").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn departure(location: &str, advertised: &str) -> AnnouncementEvent {
        let mut e = AnnouncementEvent::new(
            train(),
            Activity::Departure,
            Signature::parse(location).unwrap(),
        );
        e.advertised_time = Some(advertised.to_string());
        e
    }

    fn config() -> TrackerConfig {
        TrackerConfig::default().with_poll_interval(TICK)
    }

    /// Wait until the tracker publishes a snapshot matching `pred`.
    async fn wait_for(
        rx: &mut watch::Receiver<Arc<Snapshot>>,
        pred: impl Fn(&Snapshot) -> bool,
    ) -> Arc<Snapshot> {
        tokio::time::timeout(WAIT, async {
            loop {
                {
                    let current = rx.borrow_and_update().clone();
                    if pred(&current) {
                        return current;
                    }
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("tracker did not publish the expected snapshot in time")
    }

    #[tokio::test]
    async fn publishes_assembled_snapshots() {
        let mock = MockAnnouncementClient::new();
        mock.set_announcements(
            train(),
            vec![
                departure("Cst", "2024-01-01T09:00:00+01:00"),
                departure("Fle", "2024-01-01T09:47:00+01:00"),
            ],
        )
        .await;

        let tracker = Tracker::spawn(mock, CodeResolver::new(), train(), date(), config());
        let mut rx = tracker.subscribe();

        let snapshot = wait_for(&mut rx, |s| !s.itinerary.is_empty()).await;

        assert_eq!(snapshot.train, train());
        assert_eq!(snapshot.itinerary.len(), 2);
        assert_eq!(
            snapshot.itinerary.origin().unwrap().name,
            "Stockholm Central"
        );
    }

    #[tokio::test]
    async fn feed_growth_shows_up_in_later_snapshots() {
        let mock = MockAnnouncementClient::new();
        mock.set_announcements(train(), vec![departure("Cst", "2024-01-01T09:00:00+01:00")])
            .await;

        let tracker = Tracker::spawn(mock.clone(), CodeResolver::new(), train(), date(), config());
        let mut rx = tracker.subscribe();

        wait_for(&mut rx, |s| s.itinerary.len() == 1).await;

        mock.set_announcements(
            train(),
            vec![
                departure("Cst", "2024-01-01T09:00:00+01:00"),
                departure("Fle", "2024-01-01T09:47:00+01:00"),
                departure("K", "2024-01-01T10:15:00+01:00"),
            ],
        )
        .await;

        let grown = wait_for(&mut rx, |s| s.itinerary.len() == 3).await;
        assert_eq!(grown.itinerary.terminus().unwrap().signature.as_str(), "K");
    }

    #[tokio::test]
    async fn snapshot_is_tagged_with_its_train() {
        let mock = MockAnnouncementClient::new();
        let other = TrainId::parse("200").unwrap();
        mock.set_announcements(other.clone(), vec![departure("G", "2024-01-01T08:00:00+01:00")])
            .await;

        let tracker = Tracker::spawn(mock, CodeResolver::new(), other.clone(), date(), config());
        let mut rx = tracker.subscribe();

        let snapshot = wait_for(&mut rx, |s| !s.itinerary.is_empty()).await;

        // A consumer that switched to train 545 can tell this result is
        // for the old train and discard it.
        assert_eq!(snapshot.train, other);
        assert_ne!(snapshot.train, train());
    }

    #[tokio::test]
    async fn failed_polls_keep_the_previous_snapshot() {
        struct FailingSource;

        impl AnnouncementSource for FailingSource {
            fn announcements(
                &self,
                _train: &TrainId,
                _date: NaiveDate,
            ) -> impl Future<
                Output = Result<Arc<Vec<AnnouncementEvent>>, ApiError>,
            > + Send {
                async {
                    Err(ApiError::Api {
                        status: 503,
                        message: "unavailable".into(),
                    })
                }
            }
        }

        let tracker = Tracker::spawn(FailingSource, CodeResolver::new(), train(), date(), config());

        tokio::time::sleep(Duration::from_millis(50)).await;

        // Still the initial unknown snapshot, and still polling
        let latest = tracker.latest();
        assert!(latest.itinerary.is_empty());
        assert_eq!(latest.train, train());
        assert!(tracker.is_running());
    }

    #[tokio::test]
    async fn stop_aborts_the_poll_task() {
        let mock = MockAnnouncementClient::new();
        let tracker = Tracker::spawn(mock, CodeResolver::new(), train(), date(), config());

        assert!(tracker.is_running());
        tracker.stop();

        tokio::time::timeout(WAIT, async {
            while tracker.is_running() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("poll task did not stop");
    }

    #[tokio::test]
    async fn drop_aborts_the_poll_task() {
        let mock = MockAnnouncementClient::new();
        mock.set_announcements(train(), vec![departure("Cst", "2024-01-01T09:00:00+01:00")])
            .await;

        let tracker = Tracker::spawn(mock, CodeResolver::new(), train(), date(), config());
        let mut rx = tracker.subscribe();
        wait_for(&mut rx, |s| !s.itinerary.is_empty()).await;

        drop(tracker);

        // The watch sender goes away with the aborted task
        tokio::time::timeout(WAIT, async {
            while rx.changed().await.is_ok() {}
        })
        .await
        .expect("watch channel did not close after drop");
    }

    #[tokio::test]
    async fn status_overlay_does_not_touch_the_snapshot() {
        let snapshot = Arc::new(Snapshot::unknown(train()));

        let position = PositionSample {
            speed: Some(120.0),
            ..Default::default()
        };

        let status = TrainStatus::with_position(snapshot.clone(), Some(position));

        assert!(Arc::ptr_eq(&status.snapshot, &snapshot));
        assert_eq!(status.position.unwrap().speed, Some(120.0));
        assert!(snapshot.itinerary.is_empty());
    }
}
