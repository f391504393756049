use shared::{
    domain::NedPosition,
    protocol::{ExternalPoseEvent, InboundEvent},
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{
    setpoint::{SetpointStore, TargetSetpoint, HOLD_YAW_RAD},
    time_sync::TimeSyncTracker,
};

/// Converts external ENU poses into NED targets for the setpoint store.
#[derive(Debug, Clone)]
pub struct SetpointIngest {
    store: SetpointStore,
    time: TimeSyncTracker,
}

impl SetpointIngest {
    pub fn new(store: SetpointStore, time: TimeSyncTracker) -> Self {
        Self { store, time }
    }

    /// Values are stored as received; non-finite components are only logged.
    pub fn on_pose(&self, event: &ExternalPoseEvent) -> TargetSetpoint {
        let position = NedPosition::from_enu(&event.pose.position);
        if !position.is_finite() {
            warn!(
                x = position.x,
                y = position.y,
                z = position.z,
                "accepted non-finite target position"
            );
        }

        let target = TargetSetpoint::from_ned(self.time.read(), position, HOLD_YAW_RAD);
        self.store.set(target);
        debug!(
            x = target.x,
            y = target.y,
            z = target.z,
            "updated next target trajectory setpoint"
        );
        target
    }

    pub fn on_event(&self, event: &InboundEvent) {
        match event {
            InboundEvent::TimeSync(sync) => self.time.update(sync.timestamp),
            InboundEvent::Pose(pose) => {
                self.on_pose(pose);
            }
        }
    }

    /// Consume inbound events until every sender is gone.
    pub async fn run(self, mut events: broadcast::Receiver<InboundEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => self.on_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "inbound events lagged; continuing with newest");
                }
                Err(RecvError::Closed) => {
                    info!("inbound channel closed; ingest stopped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/ingest_tests.rs"]
mod tests;
