//! Live position samples.
//!
//! A position transport (GPS relay, push feed) delivers samples of where
//! the train physically is, independently of the announcement feed. This
//! module owns the sample shape and the subscription plumbing; the
//! transport itself lives outside the crate.

use chrono::{DateTime, FixedOffset};
use tokio::sync::mpsc;

/// A geographic fix carried by a position sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// When the fix was taken; transports that do not timestamp their
    /// fixes leave this unset.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// One position sample. Every field is optional: transports report what
/// they know and nothing more.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionSample {
    /// Speed in km/h.
    pub speed: Option<f64>,

    /// True when the speed was derived (e.g. from successive fixes)
    /// rather than reported by the vehicle.
    pub speed_is_estimate: bool,

    /// Compass bearing in degrees, 0 = north.
    pub bearing: Option<f64>,

    pub coordinates: Option<Coordinates>,
}

/// Create a connected publisher/stream pair.
///
/// `capacity` bounds the number of undelivered samples; a slow consumer
/// causes the publisher to drop new samples rather than buffer without
/// limit (positions go stale quickly, so backlog has no value).
pub fn channel(capacity: usize) -> (PositionPublisher, PositionStream) {
    let (tx, rx) = mpsc::channel(capacity);
    (PositionPublisher { tx }, PositionStream { rx })
}

/// Producing half of a position subscription, held by the transport.
#[derive(Debug, Clone)]
pub struct PositionPublisher {
    tx: mpsc::Sender<PositionSample>,
}

impl PositionPublisher {
    /// Deliver a sample. Returns `false` once the subscription has been
    /// cancelled (the transport should stop producing) or when the
    /// buffer is full (the sample is dropped).
    pub fn publish(&self, sample: PositionSample) -> bool {
        self.tx.try_send(sample).is_ok()
    }

    /// True once the consuming side has gone away.
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consuming half of a position subscription.
///
/// Dropping the stream cancels the subscription: the publisher observes
/// the cancellation on its next `publish` and stops.
#[derive(Debug)]
pub struct PositionStream {
    rx: mpsc::Receiver<PositionSample>,
}

impl PositionStream {
    /// Wait for the next sample. `None` once the publisher has gone away
    /// or after [`Self::cancel`].
    pub async fn recv(&mut self) -> Option<PositionSample> {
        self.rx.recv().await
    }

    /// Take whatever sample is already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<PositionSample> {
        self.rx.try_recv().ok()
    }

    /// Cancel the subscription explicitly. Samples already buffered are
    /// still delivered; new ones are refused.
    pub fn cancel(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(speed: f64) -> PositionSample {
        PositionSample {
            speed: Some(speed),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn samples_flow_in_order() {
        let (publisher, mut stream) = channel(8);

        assert!(publisher.publish(sample(100.0)));
        assert!(publisher.publish(sample(105.0)));

        assert_eq!(stream.recv().await.unwrap().speed, Some(100.0));
        assert_eq!(stream.recv().await.unwrap().speed, Some(105.0));
    }

    #[tokio::test]
    async fn dropping_the_stream_cancels() {
        let (publisher, stream) = channel(8);
        assert!(!publisher.is_cancelled());

        drop(stream);

        assert!(publisher.is_cancelled());
        assert!(!publisher.publish(sample(90.0)));
    }

    #[tokio::test]
    async fn explicit_cancel_drains_then_stops() {
        let (publisher, mut stream) = channel(8);

        assert!(publisher.publish(sample(80.0)));
        stream.cancel();

        // Already-buffered sample still arrives
        assert_eq!(stream.recv().await.unwrap().speed, Some(80.0));
        // Then the stream is finished
        assert!(stream.recv().await.is_none());
        // And the publisher sees the cancellation
        assert!(!publisher.publish(sample(70.0)));
    }

    #[tokio::test]
    async fn full_buffer_drops_new_samples() {
        let (publisher, mut stream) = channel(1);

        assert!(publisher.publish(sample(60.0)));
        // Buffer full; sample dropped, subscription still alive
        assert!(!publisher.publish(sample(61.0)));
        assert!(!publisher.is_cancelled());

        assert_eq!(stream.recv().await.unwrap().speed, Some(60.0));
    }

    #[tokio::test]
    async fn try_recv_does_not_wait() {
        let (publisher, mut stream) = channel(8);

        assert!(stream.try_recv().is_none());
        publisher.publish(sample(50.0));
        assert_eq!(stream.try_recv().unwrap().speed, Some(50.0));
    }
}
