use std::time::Duration;

use shared::{domain::VehicleIdentity, error::ConfigError};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(33);
pub const DEFAULT_WARMUP_TICKS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommanderConfig {
    /// Period of the control tick. Must stay well under the autopilot's
    /// offboard timeout (typically 500 ms).
    pub tick_period: Duration,
    /// Ticks of control-mode/setpoint pairs sent before requesting offboard
    /// mode and arming.
    pub warmup_ticks: u64,
    pub vehicle: VehicleIdentity,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            warmup_ticks: DEFAULT_WARMUP_TICKS,
            vehicle: VehicleIdentity::default(),
        }
    }
}

impl CommanderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.warmup_ticks == 0 {
            return Err(ConfigError::ZeroWarmup);
        }
        Ok(())
    }
}
