use std::{sync::Arc, time::Duration};

use shared::protocol::{OffboardControlMode, OutboundMessage};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    command::CommandEmitter,
    setpoint::SetpointStore,
    time_sync::TimeSyncTracker,
    transport::{publish_or_log, Publisher},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Streaming control-mode/setpoint pairs before any mode request.
    Warmup,
    /// The single tick on which offboard mode and arming are requested.
    Transition,
    Streaming,
}

/// Elapsed control ticks, saturating one past the warm-up length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceCounter {
    value: u64,
    warmup_ticks: u64,
}

impl SequenceCounter {
    pub fn new(warmup_ticks: u64) -> Self {
        Self {
            value: 0,
            warmup_ticks,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn ceiling(&self) -> u64 {
        self.warmup_ticks.saturating_add(1)
    }

    pub fn state(&self) -> SequencerState {
        match self.value.cmp(&self.warmup_ticks) {
            std::cmp::Ordering::Less => SequencerState::Warmup,
            std::cmp::Ordering::Equal => SequencerState::Transition,
            std::cmp::Ordering::Greater => SequencerState::Streaming,
        }
    }

    pub fn advance(&mut self) {
        if self.value < self.ceiling() {
            self.value += 1;
        }
    }
}

/// Periodic driver of the offboard handshake.
///
/// Every tick publishes a position-only control mode followed by the current
/// target setpoint. The tick where the counter equals the warm-up length also
/// requests offboard mode and arms, before the pair goes out.
pub struct ControlTickSequencer {
    counter: SequenceCounter,
    publisher: Arc<dyn Publisher>,
    emitter: CommandEmitter,
    setpoints: SetpointStore,
    time: TimeSyncTracker,
}

impl ControlTickSequencer {
    pub fn new(
        warmup_ticks: u64,
        publisher: Arc<dyn Publisher>,
        emitter: CommandEmitter,
        setpoints: SetpointStore,
        time: TimeSyncTracker,
    ) -> Self {
        Self {
            counter: SequenceCounter::new(warmup_ticks),
            publisher,
            emitter,
            setpoints,
            time,
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter.value()
    }

    pub fn state(&self) -> SequencerState {
        self.counter.state()
    }

    /// Run one control tick and return the state it ran in.
    pub async fn tick(&mut self) -> SequencerState {
        let state = self.counter.state();

        if state == SequencerState::Transition {
            self.emitter.request_offboard().await;
            self.emitter.arm().await;
        }

        // The autopilot drops out of offboard if this pair is ever skipped.
        let timestamp = self.time.read();
        publish_or_log(
            self.publisher.as_ref(),
            OutboundMessage::OffboardControlMode(OffboardControlMode::position_only(timestamp)),
        )
        .await;
        publish_or_log(
            self.publisher.as_ref(),
            OutboundMessage::TrajectorySetpoint(self.setpoints.get().to_message(timestamp)),
        )
        .await;

        self.counter.advance();
        state
    }

    /// Tick forever at `period`. Late ticks are skipped rather than bunched.
    pub async fn run(mut self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(period_ms = period.as_millis() as u64, "control tick started");

        loop {
            ticker.tick().await;
            let state = self.tick().await;
            if state == SequencerState::Transition {
                debug!(counter = self.counter(), "handshake complete, streaming");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/sequencer_tests.rs"]
mod tests;
