//! Detection event feed.
//!
//! The feed is the in-process event emitter: producers publish
//! [`DetectionEvent`]s, consumers subscribe and receive every event
//! published after their subscription. Delivery is fire-and-forget; slow
//! consumers lag and skip rather than backpressure the producer.
//!
//! # Example
//!
//! ```ignore
//! use presencelog::feed::DetectionFeed;
//!
//! let feed = DetectionFeed::new(64);
//! let mut rx = feed.subscribe();
//! feed.publish(event);
//! let delivered = rx.recv().await?;
//! ```

mod receiver;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::event::DetectionEvent;

pub use receiver::{EventReceiver, EventReceiverConfig, DEFAULT_EVENT_PORT};

/// Default broadcast channel capacity.
const DEFAULT_CAPACITY: usize = 64;

/// Errors that can occur in the event feed.
///
/// Receive-side faults are deliberately absent: the receiver logs and
/// keeps going, so only binding the socket can fail.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to bind the UDP event socket.
    #[error("failed to bind event socket on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

/// Clonable handle to the detection event stream.
///
/// Wraps a tokio broadcast channel: every subscriber sees every event
/// published after it subscribed, and publishing never blocks.
#[derive(Debug, Clone)]
pub struct DetectionFeed {
    tx: broadcast::Sender<DetectionEvent>,
}

impl DetectionFeed {
    /// Create a feed with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a feed with the default capacity.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Publish an event to all current subscribers.
    ///
    /// Events published while no subscriber exists are dropped; that is
    /// the platform's fire-and-forget delivery contract.
    pub fn publish(&self, event: DetectionEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("detection event dropped: no subscribers");
        }
    }

    /// Subscribe to events published from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<DetectionEvent> {
        self.tx.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for DetectionFeed {
    fn default() -> Self {
        Self::with_defaults()
    }
}
