//! Offboard command sequencing for a single vehicle.
//!
//! Two tasks share two cells: the control tick reads the time reference and
//! the current target, the inbound task writes them. See [`OffboardCommander`].

use std::sync::Arc;

use shared::{error::ConfigError, protocol::InboundEvent};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::info;

pub mod command;
pub mod config;
pub mod ingest;
pub mod sequencer;
pub mod setpoint;
pub mod time_sync;
pub mod transport;

pub use command::CommandEmitter;
pub use config::CommanderConfig;
pub use ingest::SetpointIngest;
pub use sequencer::{ControlTickSequencer, SequenceCounter, SequencerState};
pub use setpoint::{SetpointStore, TargetSetpoint};
pub use time_sync::TimeSyncTracker;
pub use transport::{BroadcastBus, Publisher};

pub struct OffboardCommander {
    config: CommanderConfig,
    publisher: Arc<dyn Publisher>,
    time: TimeSyncTracker,
    setpoints: SetpointStore,
    emitter: CommandEmitter,
}

impl OffboardCommander {
    pub fn new(config: CommanderConfig, publisher: Arc<dyn Publisher>) -> Result<Self, ConfigError> {
        config.validate()?;

        let time = TimeSyncTracker::new();
        let takeoff = TargetSetpoint::takeoff(time.read());
        let setpoints = SetpointStore::new(takeoff);
        info!(
            x = takeoff.x,
            y = takeoff.y,
            z = takeoff.z,
            yaw = takeoff.yaw,
            "defined initial trajectory setpoint"
        );
        let emitter = CommandEmitter::new(Arc::clone(&publisher), time.clone(), config.vehicle);

        Ok(Self {
            config,
            publisher,
            time,
            setpoints,
            emitter,
        })
    }

    pub fn config(&self) -> &CommanderConfig {
        &self.config
    }

    pub fn time(&self) -> &TimeSyncTracker {
        &self.time
    }

    pub fn setpoints(&self) -> &SetpointStore {
        &self.setpoints
    }

    pub fn emitter(&self) -> &CommandEmitter {
        &self.emitter
    }

    pub fn ingest(&self) -> SetpointIngest {
        SetpointIngest::new(self.setpoints.clone(), self.time.clone())
    }

    pub fn sequencer(&self) -> ControlTickSequencer {
        ControlTickSequencer::new(
            self.config.warmup_ticks,
            Arc::clone(&self.publisher),
            self.emitter.clone(),
            self.setpoints.clone(),
            self.time.clone(),
        )
    }

    /// Start the control tick and the inbound consumer.
    pub fn spawn(self, inbound: broadcast::Receiver<InboundEvent>) -> CommanderHandle {
        let tick_task = tokio::spawn(self.sequencer().run(self.config.tick_period));
        let ingest_task = tokio::spawn(self.ingest().run(inbound));
        info!(
            warmup_ticks = self.config.warmup_ticks,
            "offboard commander running"
        );

        CommanderHandle {
            time: self.time,
            setpoints: self.setpoints,
            emitter: self.emitter,
            tick_task,
            ingest_task,
        }
    }
}

pub struct CommanderHandle {
    time: TimeSyncTracker,
    setpoints: SetpointStore,
    emitter: CommandEmitter,
    tick_task: JoinHandle<()>,
    ingest_task: JoinHandle<()>,
}

impl CommanderHandle {
    pub async fn arm(&self) {
        self.emitter.arm().await;
    }

    pub async fn disarm(&self) {
        self.emitter.disarm().await;
    }

    pub fn current_setpoint(&self) -> TargetSetpoint {
        self.setpoints.get()
    }

    pub fn timestamp(&self) -> u64 {
        self.time.read()
    }

    pub fn is_ingest_running(&self) -> bool {
        !self.ingest_task.is_finished()
    }

    pub async fn shutdown(self) {
        self.tick_task.abort();
        self.ingest_task.abort();
        let _ = self.tick_task.await;
        let _ = self.ingest_task.await;
        info!("offboard commander stopped");
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
