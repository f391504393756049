use super::*;
use shared::protocol::{OffboardControlMode, TimeSyncEvent};
use std::time::Duration;

#[test]
fn decode_rejects_unknown_event_type() {
    assert!(decode_inbound(br#"{"type":"land","payload":{}}"#).is_err());
}

#[test]
fn decode_accepts_time_sync() {
    let event = decode_inbound(br#"{"type":"time_sync","payload":{"timestamp":77}}"#)
        .expect("decode");
    assert_eq!(event, InboundEvent::TimeSync(TimeSyncEvent { timestamp: 77 }));
}

#[tokio::test]
async fn publisher_sends_one_datagram_per_message() {
    let peer = UdpSocket::bind("127.0.0.1:0").await.expect("bind peer");
    let local = Arc::new(UdpSocket::bind("127.0.0.1:0").await.expect("bind local"));
    let publisher = UdpPublisher::new(local, peer.local_addr().expect("peer addr"));

    let msg = OutboundMessage::OffboardControlMode(OffboardControlMode::position_only(3));
    publisher.publish(msg).await.expect("publish");

    let mut buf = [0u8; 1024];
    let (len, _) = tokio::time::timeout(Duration::from_secs(2), peer.recv_from(&mut buf))
        .await
        .expect("datagram in time")
        .expect("recv");
    let decoded: OutboundMessage = serde_json::from_slice(&buf[..len]).expect("json");
    assert_eq!(decoded, msg);
}

#[tokio::test]
async fn inbound_datagrams_reach_the_bus() {
    let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.expect("bind"));
    let addr = socket.local_addr().expect("addr");
    let bus = BroadcastBus::new();
    let mut inbound = bus.subscribe_inbound();
    let task = tokio::spawn(receive_inbound(socket, bus.clone()));

    let sender = UdpSocket::bind("127.0.0.1:0").await.expect("bind sender");
    sender.send_to(b"not json", addr).await.expect("send garbage");
    sender
        .send_to(br#"{"type":"time_sync","payload":{"timestamp":5}}"#, addr)
        .await
        .expect("send sync");

    let event = tokio::time::timeout(Duration::from_secs(2), inbound.recv())
        .await
        .expect("event in time")
        .expect("event");
    assert_eq!(event, InboundEvent::TimeSync(TimeSyncEvent { timestamp: 5 }));

    task.abort();
}
