//! JSON-over-UDP stand-in for the autopilot transport.
//!
//! Each outbound message is one datagram holding the tagged
//! [`OutboundMessage`]; each inbound datagram must decode as an
//! [`InboundEvent`].

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use commander_core::{BroadcastBus, Publisher};
use shared::{
    error::PublishError,
    protocol::{InboundEvent, OutboundMessage},
};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const MAX_DATAGRAM_BYTES: usize = 64 * 1024;

pub struct UdpPublisher {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl UdpPublisher {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr) -> Self {
        Self { socket, peer }
    }
}

#[async_trait]
impl Publisher for UdpPublisher {
    async fn publish(&self, message: OutboundMessage) -> Result<(), PublishError> {
        let bytes = encode_outbound(&message)?;
        self.socket.send_to(&bytes, self.peer).await?;
        Ok(())
    }
}

pub fn encode_outbound(message: &OutboundMessage) -> Result<Vec<u8>, PublishError> {
    serde_json::to_vec(message).map_err(|source| PublishError::Encode {
        topic: message.topic(),
        source,
    })
}

pub fn decode_inbound(bytes: &[u8]) -> Result<InboundEvent, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Forward decodable datagrams onto the bus until the socket fails.
pub async fn receive_inbound(socket: Arc<UdpSocket>, bus: BroadcastBus) {
    let mut buf = vec![0u8; MAX_DATAGRAM_BYTES];
    loop {
        let (len, from) = match socket.recv_from(&mut buf).await {
            Ok(v) => v,
            Err(error) => {
                warn!(%error, "udp receive failed; inbound bridge stopped");
                return;
            }
        };

        let event = match decode_inbound(&buf[..len]) {
            Ok(event) => event,
            Err(error) => {
                warn!(%from, %error, "dropping undecodable datagram");
                continue;
            }
        };

        if let Err(error) = bus.deliver(event) {
            debug!(%error, "inbound event had no consumer");
        }
    }
}

#[cfg(test)]
#[path = "tests/udp_tests.rs"]
mod tests;
