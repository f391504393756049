use super::*;
use crate::test_support::{commands, RecordingPublisher};
use shared::domain::{ComponentId, SystemId};

fn emitter(publisher: Arc<RecordingPublisher>, time: TimeSyncTracker) -> CommandEmitter {
    CommandEmitter::new(publisher, time, VehicleIdentity::default())
}

#[tokio::test]
async fn emit_stamps_current_time_and_fixed_endpoint() {
    let publisher = RecordingPublisher::new();
    let time = TimeSyncTracker::new();
    time.update(123_456);

    emitter(publisher.clone(), time)
        .emit(VehicleCommand::DO_SET_MODE, 1.0, 6.0)
        .await;

    let sent = commands(&publisher.take().await);
    assert_eq!(sent.len(), 1);
    let cmd = sent[0];
    assert_eq!(cmd.timestamp, 123_456);
    assert_eq!(cmd.command, VehicleCommand::DO_SET_MODE);
    assert_eq!(cmd.param1, 1.0);
    assert_eq!(cmd.param2, 6.0);
    assert_eq!(cmd.target_system, SystemId(1));
    assert_eq!(cmd.target_component, ComponentId(1));
    assert_eq!(cmd.source_system, SystemId(1));
    assert_eq!(cmd.source_component, ComponentId(1));
    assert!(cmd.from_external);
}

#[tokio::test]
async fn arm_and_disarm_differ_only_in_param1() {
    let publisher = RecordingPublisher::new();
    let emitter = emitter(publisher.clone(), TimeSyncTracker::new());

    emitter.arm().await;
    emitter.disarm().await;

    let sent = commands(&publisher.take().await);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].command, VehicleCommand::COMPONENT_ARM_DISARM);
    assert_eq!(sent[0].param1, 1.0);
    assert_eq!(sent[1].command, VehicleCommand::COMPONENT_ARM_DISARM);
    assert_eq!(sent[1].param1, 0.0);
    assert_eq!(sent[0].param2, 0.0);
    assert_eq!(sent[1].param2, 0.0);
}

#[tokio::test]
async fn commands_before_sync_carry_zero_timestamp() {
    let publisher = RecordingPublisher::new();
    emitter(publisher.clone(), TimeSyncTracker::new()).arm().await;

    let sent = commands(&publisher.take().await);
    assert_eq!(sent[0].timestamp, 0);
}

#[tokio::test]
async fn publish_failure_is_not_surfaced() {
    let publisher = RecordingPublisher::failing();
    let emitter = emitter(publisher.clone(), TimeSyncTracker::new());

    emitter.request_offboard().await;
    emitter.arm().await;

    assert_eq!(commands(&publisher.take().await).len(), 2);
}
