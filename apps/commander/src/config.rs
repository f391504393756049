use std::{fs, net::SocketAddr, path::Path, time::Duration};

use anyhow::Context;
use commander_core::CommanderConfig;
use serde::Deserialize;
use shared::{
    domain::{ComponentId, SystemId, VehicleIdentity},
    error::ConfigError,
};

const DEFAULT_CONFIG_FILE: &str = "commander.toml";
const ENV_PREFIX: &str = "OFFBOARD__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub listen_addr: String,
    pub peer_addr: String,
    pub tick_period_ms: u64,
    pub warmup_ticks: u64,
    pub target_system: u8,
    pub target_component: u8,
    pub source_system: u8,
    pub source_component: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:14540".into(),
            peer_addr: "127.0.0.1:14541".into(),
            tick_period_ms: 33,
            warmup_ticks: 10,
            target_system: 1,
            target_component: 1,
            source_system: 1,
            source_component: 1,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    listen_addr: Option<String>,
    peer_addr: Option<String>,
    tick_period_ms: Option<u64>,
    warmup_ticks: Option<u64>,
    target_system: Option<u8>,
    target_component: Option<u8>,
    source_system: Option<u8>,
    source_component: Option<u8>,
}

impl Settings {
    pub fn commander_config(&self) -> Result<CommanderConfig, ConfigError> {
        let config = CommanderConfig {
            tick_period: Duration::from_millis(self.tick_period_ms),
            warmup_ticks: self.warmup_ticks,
            vehicle: VehicleIdentity {
                target_system: SystemId(self.target_system),
                target_component: ComponentId(self.target_component),
                source_system: SystemId(self.source_system),
                source_component: ComponentId(self.source_component),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr("listen_addr", &self.listen_addr)
    }

    pub fn peer_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr("peer_addr", &self.peer_addr)
    }
}

/// Defaults, then the config file, then `OFFBOARD__*` environment variables.
///
/// An explicit `path` must exist; the default `commander.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                apply_file(&mut settings, &raw)
                    .with_context(|| format!("failed to parse '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.listen_addr {
        settings.listen_addr = v;
    }
    if let Some(v) = file_cfg.peer_addr {
        settings.peer_addr = v;
    }
    if let Some(v) = file_cfg.tick_period_ms {
        settings.tick_period_ms = v;
    }
    if let Some(v) = file_cfg.warmup_ticks {
        settings.warmup_ticks = v;
    }
    if let Some(v) = file_cfg.target_system {
        settings.target_system = v;
    }
    if let Some(v) = file_cfg.target_component {
        settings.target_component = v;
    }
    if let Some(v) = file_cfg.source_system {
        settings.source_system = v;
    }
    if let Some(v) = file_cfg.source_component {
        settings.source_component = v;
    }

    Ok(())
}

/// Unparsable numeric overrides are ignored.
fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("LISTEN_ADDR") {
        settings.listen_addr = v;
    }
    if let Some(v) = var("PEER_ADDR") {
        settings.peer_addr = v;
    }
    if let Some(v) = var("TICK_PERIOD_MS").and_then(|v| v.parse().ok()) {
        settings.tick_period_ms = v;
    }
    if let Some(v) = var("WARMUP_TICKS").and_then(|v| v.parse().ok()) {
        settings.warmup_ticks = v;
    }
    if let Some(v) = var("TARGET_SYSTEM").and_then(|v| v.parse().ok()) {
        settings.target_system = v;
    }
    if let Some(v) = var("TARGET_COMPONENT").and_then(|v| v.parse().ok()) {
        settings.target_component = v;
    }
    if let Some(v) = var("SOURCE_SYSTEM").and_then(|v| v.parse().ok()) {
        settings.source_system = v;
    }
    if let Some(v) = var("SOURCE_COMPONENT").and_then(|v| v.parse().ok()) {
        settings.source_component = v;
    }
}

fn parse_addr(key: &'static str, value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAddress {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
