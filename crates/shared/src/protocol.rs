use serde::{Deserialize, Serialize};

use crate::domain::{ComponentId, Pose, SystemId, VehicleIdentity};

pub const OFFBOARD_CONTROL_MODE_TOPIC: &str = "OffboardControlMode_PubSubTopic";
pub const TRAJECTORY_SETPOINT_TOPIC: &str = "TrajectorySetpoint_PubSubTopic";
pub const VEHICLE_COMMAND_TOPIC: &str = "VehicleCommand_PubSubTopic";
pub const TIMESYNC_TOPIC: &str = "Timesync_PubSubTopic";
pub const NEXT_SETPOINT_TOPIC: &str = "osd/next_trajectory_setpoint";

/// Which control loops the autopilot should run from offboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffboardControlMode {
    pub timestamp: u64,
    pub position: bool,
    pub velocity: bool,
    pub acceleration: bool,
    pub attitude: bool,
    pub body_rate: bool,
}

impl OffboardControlMode {
    pub fn position_only(timestamp: u64) -> Self {
        Self {
            timestamp,
            position: true,
            velocity: false,
            acceleration: false,
            attitude: false,
            body_rate: false,
        }
    }
}

/// NED position target with yaw in radians, [-pi, pi].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySetpoint {
    pub timestamp: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleCommand {
    pub timestamp: u64,
    pub command: u16,
    pub param1: f32,
    pub param2: f32,
    pub target_system: SystemId,
    pub target_component: ComponentId,
    pub source_system: SystemId,
    pub source_component: ComponentId,
    pub from_external: bool,
}

impl VehicleCommand {
    pub const DO_SET_MODE: u16 = 176;
    pub const COMPONENT_ARM_DISARM: u16 = 400;

    /// `param1` of DO_SET_MODE: custom mode flag.
    pub const MODE_FLAG_CUSTOM: f32 = 1.0;
    /// `param2` of DO_SET_MODE: offboard main mode.
    pub const CUSTOM_MAIN_MODE_OFFBOARD: f32 = 6.0;

    pub fn new(
        timestamp: u64,
        command: u16,
        param1: f32,
        param2: f32,
        identity: VehicleIdentity,
    ) -> Self {
        Self {
            timestamp,
            command,
            param1,
            param2,
            target_system: identity.target_system,
            target_component: identity.target_component,
            source_system: identity.source_system,
            source_component: identity.source_component,
            from_external: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum OutboundMessage {
    OffboardControlMode(OffboardControlMode),
    TrajectorySetpoint(TrajectorySetpoint),
    VehicleCommand(VehicleCommand),
}

impl OutboundMessage {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::OffboardControlMode(_) => OFFBOARD_CONTROL_MODE_TOPIC,
            Self::TrajectorySetpoint(_) => TRAJECTORY_SETPOINT_TOPIC,
            Self::VehicleCommand(_) => VEHICLE_COMMAND_TOPIC,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            Self::OffboardControlMode(msg) => msg.timestamp,
            Self::TrajectorySetpoint(msg) => msg.timestamp,
            Self::VehicleCommand(msg) => msg.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSyncEvent {
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPoseEvent {
    pub pose: Pose,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InboundEvent {
    TimeSync(TimeSyncEvent),
    Pose(ExternalPoseEvent),
}

impl InboundEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::TimeSync(_) => TIMESYNC_TOPIC,
            Self::Pose(_) => NEXT_SETPOINT_TOPIC,
        }
    }
}
