use std::{f32::consts::PI, sync::Arc};

use shared::{domain::NedPosition, protocol::TrajectorySetpoint};
use tokio::sync::watch;

/// Yaw written on every setpoint; incoming orientation is not used.
pub const HOLD_YAW_RAD: f32 = -PI;

/// Altitude of the startup pose, NED (1 m above origin).
pub const TAKEOFF_Z_NED: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSetpoint {
    pub timestamp: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
}

impl TargetSetpoint {
    pub fn takeoff(timestamp: u64) -> Self {
        Self {
            timestamp,
            x: 0.0,
            y: 0.0,
            z: TAKEOFF_Z_NED,
            yaw: HOLD_YAW_RAD,
        }
    }

    pub fn from_ned(timestamp: u64, position: NedPosition, yaw: f32) -> Self {
        Self {
            timestamp,
            x: position.x,
            y: position.y,
            z: position.z,
            yaw,
        }
    }

    /// Outgoing message, stamped with the current time reference rather than
    /// the time the target was stored.
    pub fn to_message(&self, timestamp: u64) -> TrajectorySetpoint {
        TrajectorySetpoint {
            timestamp,
            x: self.x,
            y: self.y,
            z: self.z,
            yaw: self.yaw,
        }
    }
}

/// Single current target, replaced whole on every `set`.
///
/// Readers get a copy taken under the channel's lock, so a write racing a read
/// yields either the old or the new setpoint, never a mix.
#[derive(Debug, Clone)]
pub struct SetpointStore {
    current: Arc<watch::Sender<TargetSetpoint>>,
}

impl SetpointStore {
    pub fn new(initial: TargetSetpoint) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            current: Arc::new(current),
        }
    }

    pub fn set(&self, setpoint: TargetSetpoint) {
        self.current.send_replace(setpoint);
    }

    pub fn get(&self) -> TargetSetpoint {
        *self.current.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TargetSetpoint> {
        self.current.subscribe()
    }
}

impl Default for SetpointStore {
    fn default() -> Self {
        Self::new(TargetSetpoint::takeoff(0))
    }
}

#[cfg(test)]
#[path = "tests/setpoint_tests.rs"]
mod tests;
