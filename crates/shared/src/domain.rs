use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u8);
    };
}

id_newtype!(SystemId);
id_newtype!(ComponentId);

/// Addressing used on every vehicle command: one autopilot endpoint, one
/// commander endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub target_system: SystemId,
    pub target_component: ComponentId,
    pub source_system: SystemId,
    pub source_component: ComponentId,
}

impl Default for VehicleIdentity {
    fn default() -> Self {
        Self {
            target_system: SystemId(1),
            target_component: ComponentId(1),
            source_system: SystemId(1),
            source_component: ComponentId(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// Pose in the external (ENU, z up) convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    #[serde(default)]
    pub orientation: Quaternion,
}

/// Position in the autopilot's North-East-Down frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NedPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NedPosition {
    /// Only the vertical axis changes sign; x and y pass through as-is.
    pub fn from_enu(position: &Point) -> Self {
        Self {
            x: position.x as f32,
            y: position.y as f32,
            z: -position.z as f32,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
