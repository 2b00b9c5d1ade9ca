//! UDP event receiver.
//!
//! Listens for detection events sent by the sensing platform as JSON
//! datagrams and publishes them to the [`DetectionFeed`]. Malformed
//! datagrams are dropped with a debug log; the receiver itself only fails
//! on socket errors.

use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::event::DetectionEvent;

use super::{DetectionFeed, FeedError};

/// Default UDP port for platform events.
pub const DEFAULT_EVENT_PORT: u16 = 50001;

/// Maximum accepted datagram size. Platform events are well under 8KB.
const MAX_DATAGRAM_BYTES: usize = 8192;

/// Configuration for the UDP event receiver.
#[derive(Debug, Clone)]
pub struct EventReceiverConfig {
    /// Address to bind, without port.
    pub bind_address: String,

    /// UDP port to listen on.
    pub port: u16,
}

impl Default for EventReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_EVENT_PORT,
        }
    }
}

/// Receives platform events over UDP and publishes them to the feed.
pub struct EventReceiver {
    config: EventReceiverConfig,
    feed: DetectionFeed,
}

impl EventReceiver {
    /// Create a receiver publishing into the given feed.
    pub fn new(config: EventReceiverConfig, feed: DetectionFeed) -> Self {
        Self { config, feed }
    }

    /// Run the receive loop until cancelled.
    ///
    /// Binds the configured socket, then parses and publishes each datagram.
    /// Only the bind can fail; transient socket receive errors are logged
    /// and the loop continues, so the pipeline is never interrupted by a
    /// stray network fault. Returns on cancellation.
    pub async fn run(self, cancellation: CancellationToken) -> Result<(), FeedError> {
        let addr = format!("{}:{}", self.config.bind_address, self.config.port);
        let socket = UdpSocket::bind(&addr).await.map_err(|source| FeedError::Bind {
            addr: addr.clone(),
            source,
        })?;

        info!(addr = %addr, "event receiver listening");

        let mut buf = vec![0u8; MAX_DATAGRAM_BYTES];
        loop {
            tokio::select! {
                biased;

                _ = cancellation.cancelled() => {
                    debug!("event receiver cancelled");
                    return Ok(());
                }

                result = socket.recv_from(&mut buf) => {
                    match result {
                        Ok((len, peer)) => {
                            match serde_json::from_slice::<DetectionEvent>(&buf[..len]) {
                                Ok(event) => {
                                    trace!(category = %event.category, device = %event.tiraid.identifier.value,
                                           "event received");
                                    self.feed.publish(event);
                                }
                                Err(e) => {
                                    debug!(peer = %peer, error = %e, "dropping malformed event datagram");
                                }
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "event socket receive failed, continuing");
                        }
                    }
                }
            }
        }
    }
}
