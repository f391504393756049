use async_trait::async_trait;
use shared::{
    error::PublishError,
    protocol::{InboundEvent, OutboundMessage},
};
use tokio::sync::broadcast;
use tracing::warn;

const DEFAULT_BUS_CAPACITY: usize = 256;

/// Outbound side of the pub/sub substrate.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: OutboundMessage) -> Result<(), PublishError>;
}

/// Publish and drop any failure after logging it. The next tick re-sends the
/// same kind of message, so nothing is retried here.
pub(crate) async fn publish_or_log(publisher: &dyn Publisher, message: OutboundMessage) {
    if let Err(error) = publisher.publish(message).await {
        warn!(topic = message.topic(), %error, "publish failed");
    }
}

/// In-process substrate: one broadcast channel per direction.
#[derive(Debug, Clone)]
pub struct BroadcastBus {
    outbound: broadcast::Sender<OutboundMessage>,
    inbound: broadcast::Sender<InboundEvent>,
}

impl BroadcastBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (outbound, _) = broadcast::channel(capacity);
        let (inbound, _) = broadcast::channel(capacity);
        Self { outbound, inbound }
    }

    pub fn subscribe_outbound(&self) -> broadcast::Receiver<OutboundMessage> {
        self.outbound.subscribe()
    }

    pub fn subscribe_inbound(&self) -> broadcast::Receiver<InboundEvent> {
        self.inbound.subscribe()
    }

    /// Deliver an event to every inbound subscriber.
    pub fn deliver(&self, event: InboundEvent) -> Result<usize, PublishError> {
        self.inbound
            .send(event)
            .map_err(|_| PublishError::NoSubscribers {
                topic: event.topic(),
            })
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for BroadcastBus {
    async fn publish(&self, message: OutboundMessage) -> Result<(), PublishError> {
        self.outbound
            .send(message)
            .map(|_| ())
            .map_err(|_| PublishError::NoSubscribers {
                topic: message.topic(),
            })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
