use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use commander_core::{BroadcastBus, OffboardCommander};
use tokio::net::UdpSocket;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod udp;

use config::{load_settings, Settings};
use udp::{receive_inbound, UdpPublisher};

#[derive(Parser, Debug)]
#[command(about = "Stream offboard setpoints to a PX4-style autopilot")]
struct Args {
    /// TOML settings file (default: ./commander.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    listen_addr: Option<String>,
    #[arg(long)]
    peer_addr: Option<String>,
    #[arg(long)]
    tick_period_ms: Option<u64>,
    #[arg(long)]
    warmup_ticks: Option<u64>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.listen_addr {
            settings.listen_addr = v;
        }
        if let Some(v) = self.peer_addr {
            settings.peer_addr = v;
        }
        if let Some(v) = self.tick_period_ms {
            settings.tick_period_ms = v;
        }
        if let Some(v) = self.warmup_ticks {
            settings.warmup_ticks = v;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);

    let config = settings.commander_config()?;
    let listen = settings.listen_socket_addr()?;
    let peer = settings.peer_socket_addr()?;

    let socket = Arc::new(
        UdpSocket::bind(listen)
            .await
            .with_context(|| format!("failed to bind udp socket on {listen}"))?,
    );
    info!(%listen, %peer, "udp bridge ready");

    let bus = BroadcastBus::new();
    let publisher = Arc::new(UdpPublisher::new(Arc::clone(&socket), peer));
    let commander = OffboardCommander::new(config, publisher)?;
    let handle = commander.spawn(bus.subscribe_inbound());
    let receiver = tokio::spawn(receive_inbound(socket, bus));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("shutdown requested");

    receiver.abort();
    handle.shutdown().await;
    Ok(())
}
