//! Relay config loader (strict parsing).

use std::fs;

use pulselink_core::{ProtocolError, Result};
use serde::Deserialize;

/// Limits and timings the embedding transport enforces around the codec.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub version: u32,

    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Inbound frames longer than this are refused with status 405.
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,

    /// Delay between an implicit clear and the pulse that follows it.
    #[serde(default = "default_pulse_delay_ms")]
    pub pulse_delay_ms: u64,
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ProtocolError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        if !(5_000..=120_000).contains(&self.heartbeat_interval_ms) {
            return Err(ProtocolError::OutOfRange {
                field: "heartbeat_interval_ms",
                min: 5_000,
                max: 120_000,
                actual: self.heartbeat_interval_ms as i64,
            });
        }
        if self.idle_timeout_ms <= self.heartbeat_interval_ms {
            return Err(ProtocolError::Config(
                "idle_timeout_ms must be greater than heartbeat_interval_ms".into(),
            ));
        }
        if !(256..=65_536).contains(&self.max_message_len) {
            return Err(ProtocolError::OutOfRange {
                field: "max_message_len",
                min: 256,
                max: 65_536,
                actual: self.max_message_len as i64,
            });
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            max_message_len: default_max_message_len(),
            pulse_delay_ms: default_pulse_delay_ms(),
        }
    }
}

pub fn load_from_file(path: &str) -> Result<RelayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ProtocolError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RelayConfig> {
    let cfg: RelayConfig = serde_yaml::from_str(s)
        .map_err(|e| ProtocolError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

fn default_heartbeat_interval_ms() -> u64 {
    30_000
}
fn default_idle_timeout_ms() -> u64 {
    90_000
}
fn default_max_message_len() -> usize {
    4_096
}
fn default_pulse_delay_ms() -> u64 {
    500
}
