use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    error::PublishError,
    protocol::{OffboardControlMode, OutboundMessage, TrajectorySetpoint, VehicleCommand},
};
use tokio::sync::Mutex;

use crate::transport::Publisher;

#[derive(Default)]
pub(crate) struct RecordingPublisher {
    sent: Mutex<Vec<OutboundMessage>>,
    fail: bool,
}

impl RecordingPublisher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub(crate) async fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.sent.lock().await)
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, message: OutboundMessage) -> Result<(), PublishError> {
        self.sent.lock().await.push(message);
        if self.fail {
            return Err(PublishError::Closed);
        }
        Ok(())
    }
}

pub(crate) fn commands(messages: &[OutboundMessage]) -> Vec<VehicleCommand> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            OutboundMessage::VehicleCommand(cmd) => Some(*cmd),
            _ => None,
        })
        .collect()
}

pub(crate) fn control_modes(messages: &[OutboundMessage]) -> Vec<OffboardControlMode> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            OutboundMessage::OffboardControlMode(mode) => Some(*mode),
            _ => None,
        })
        .collect()
}

pub(crate) fn setpoints(messages: &[OutboundMessage]) -> Vec<TrajectorySetpoint> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            OutboundMessage::TrajectorySetpoint(sp) => Some(*sp),
            _ => None,
        })
        .collect()
}
