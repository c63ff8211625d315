use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::ticker::CyclePeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u64,

    /// Initial time between generations once unpaused.
    pub cycle_period_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            target_fps: 60,
            cycle_period_ms: CyclePeriod::default().millis(),
        }
    }
}

impl ClientConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        Self::from_json(&config_serialized)
    }

    fn from_json(config_serialized: &[u8]) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_slice(config_serialized).context("Couldn't deserialize config")?;

        anyhow::ensure!(config.target_fps > 0, "target_fps must be positive");
        anyhow::ensure!(
            config.window_width > 0 && config.window_height > 0,
            "window size must be positive"
        );

        Ok(config)
    }

    pub fn cycle_period(&self) -> CyclePeriod {
        CyclePeriod::from_millis(self.cycle_period_ms)
    }
}
