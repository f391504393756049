use std::sync::Arc;

use shared::{
    domain::VehicleIdentity,
    protocol::{OutboundMessage, VehicleCommand},
};
use tracing::info;

use crate::{
    time_sync::TimeSyncTracker,
    transport::{publish_or_log, Publisher},
};

/// Builds vehicle commands stamped with the current time reference and sends
/// them fire-and-forget.
#[derive(Clone)]
pub struct CommandEmitter {
    publisher: Arc<dyn Publisher>,
    time: TimeSyncTracker,
    vehicle: VehicleIdentity,
}

impl CommandEmitter {
    pub fn new(
        publisher: Arc<dyn Publisher>,
        time: TimeSyncTracker,
        vehicle: VehicleIdentity,
    ) -> Self {
        Self {
            publisher,
            time,
            vehicle,
        }
    }

    pub async fn emit(&self, command: u16, param1: f32, param2: f32) {
        let msg = VehicleCommand::new(self.time.read(), command, param1, param2, self.vehicle);
        publish_or_log(self.publisher.as_ref(), OutboundMessage::VehicleCommand(msg)).await;
    }

    /// Switch the autopilot to offboard mode.
    pub async fn request_offboard(&self) {
        self.emit(
            VehicleCommand::DO_SET_MODE,
            VehicleCommand::MODE_FLAG_CUSTOM,
            VehicleCommand::CUSTOM_MAIN_MODE_OFFBOARD,
        )
        .await;
        info!("offboard mode requested");
    }

    pub async fn arm(&self) {
        self.emit(VehicleCommand::COMPONENT_ARM_DISARM, 1.0, 0.0).await;
        info!("arm command sent");
    }

    pub async fn disarm(&self) {
        self.emit(VehicleCommand::COMPONENT_ARM_DISARM, 0.0, 0.0).await;
        info!("disarm command sent");
    }
}

#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod tests;
