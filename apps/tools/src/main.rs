use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{
    domain::{Point, Pose},
    protocol::{ExternalPoseEvent, InboundEvent, OutboundMessage, TimeSyncEvent},
};
use tokio::net::UdpSocket;

#[derive(Parser, Debug)]
struct Cli {
    /// Address the commander listens on for inbound events.
    #[arg(long, default_value = "127.0.0.1:14540")]
    commander_addr: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send an autopilot time sync.
    TimeSync { timestamp: u64 },
    /// Send a target pose (ENU, z up).
    Pose {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
    },
    /// Print what the commander streams to the autopilot.
    Listen {
        #[arg(long, default_value = "127.0.0.1:14541")]
        bind: String,
        /// Stop after this many messages.
        #[arg(long)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::TimeSync { timestamp } => {
            let event = InboundEvent::TimeSync(TimeSyncEvent { timestamp });
            send(&cli.commander_addr, &event).await?;
            println!("sent time sync timestamp={timestamp}");
        }
        Command::Pose { x, y, z } => {
            let event = InboundEvent::Pose(ExternalPoseEvent {
                pose: Pose {
                    position: Point { x, y, z },
                    ..Pose::default()
                },
            });
            send(&cli.commander_addr, &event).await?;
            println!("sent pose x={x} y={y} z={z}");
        }
        Command::Listen { bind, count } => {
            let socket = UdpSocket::bind(&bind)
                .await
                .with_context(|| format!("failed to bind {bind}"))?;
            let mut buf = vec![0u8; 64 * 1024];
            let mut seen = 0usize;
            while count.map_or(true, |limit| seen < limit) {
                let (len, _) = socket.recv_from(&mut buf).await?;
                match serde_json::from_slice::<OutboundMessage>(&buf[..len]) {
                    Ok(msg) => println!("{} {}", msg.topic(), serde_json::to_string(&msg)?),
                    Err(err) => println!("undecodable datagram ({len} bytes): {err}"),
                }
                seen += 1;
            }
        }
    }

    Ok(())
}

async fn send(addr: &str, event: &InboundEvent) -> Result<()> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    let bytes = serde_json::to_vec(event)?;
    socket
        .send_to(&bytes, addr)
        .await
        .with_context(|| format!("failed to send {} event to {addr}", event.topic()))?;
    Ok(())
}
