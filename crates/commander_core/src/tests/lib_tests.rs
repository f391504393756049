use super::*;
use crate::test_support::{commands, setpoints, RecordingPublisher};
use shared::{
    domain::{Point, Pose},
    protocol::{ExternalPoseEvent, TimeSyncEvent, VehicleCommand},
};
use std::time::Duration;

fn pose(x: f64, y: f64, z: f64) -> InboundEvent {
    InboundEvent::Pose(ExternalPoseEvent {
        pose: Pose {
            position: Point { x, y, z },
            ..Pose::default()
        },
    })
}

#[test]
fn invalid_config_is_rejected() {
    let config = CommanderConfig {
        warmup_ticks: 0,
        ..CommanderConfig::default()
    };
    let result = OffboardCommander::new(config, RecordingPublisher::new());
    assert!(matches!(result, Err(ConfigError::ZeroWarmup)));
}

#[test]
fn new_commander_starts_from_takeoff_pose() {
    let commander =
        OffboardCommander::new(CommanderConfig::default(), RecordingPublisher::new()).expect("new");
    assert_eq!(commander.setpoints().get(), TargetSetpoint::takeoff(0));
    assert_eq!(commander.time().read(), 0);
}

#[tokio::test(start_paused = true)]
async fn spawned_commander_hands_off_and_streams_new_target() {
    let publisher = RecordingPublisher::new();
    let commander =
        OffboardCommander::new(CommanderConfig::default(), publisher.clone()).expect("new");
    let (tx, rx) = broadcast::channel(16);
    let handle = commander.spawn(rx);

    tx.send(InboundEvent::TimeSync(TimeSyncEvent { timestamp: 1_000 }))
        .expect("sync");
    tokio::time::sleep(Duration::from_millis(33 * 12)).await;

    tx.send(pose(2.0, -3.0, 5.0)).expect("pose");
    tokio::time::sleep(Duration::from_millis(33 * 2)).await;

    let current = handle.current_setpoint();
    assert_eq!((current.x, current.y, current.z), (2.0, -3.0, -5.0));
    assert_eq!(handle.timestamp(), 1_000);

    let sent = publisher.take().await;
    let cmds = commands(&sent);
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].command, VehicleCommand::DO_SET_MODE);
    assert_eq!(cmds[1].command, VehicleCommand::COMPONENT_ARM_DISARM);

    let last = *setpoints(&sent).last().expect("streamed setpoints");
    assert_eq!((last.x, last.y, last.z), (2.0, -3.0, -5.0));
    assert_eq!(last.timestamp, 1_000);

    handle.shutdown().await;
}

#[tokio::test]
async fn handle_disarm_emits_command() {
    let publisher = RecordingPublisher::new();
    let commander =
        OffboardCommander::new(CommanderConfig::default(), publisher.clone()).expect("new");
    let (_tx, rx) = broadcast::channel(4);
    let handle = commander.spawn(rx);

    handle.disarm().await;
    handle.shutdown().await;

    let cmds = commands(&publisher.take().await);
    assert!(cmds
        .iter()
        .any(|cmd| cmd.command == VehicleCommand::COMPONENT_ARM_DISARM && cmd.param1 == 0.0));
}

#[tokio::test]
async fn ingest_stops_when_inbound_closes() {
    let commander =
        OffboardCommander::new(CommanderConfig::default(), RecordingPublisher::new()).expect("new");
    let (tx, rx) = broadcast::channel::<InboundEvent>(4);
    let handle = commander.spawn(rx);

    drop(tx);
    for _ in 0..50 {
        if !handle.is_ingest_running() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(!handle.is_ingest_running());
    handle.shutdown().await;
}
