use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether detected winners surface at once or wait for the organizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnouncementMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub announcement_mode: AnnouncementMode,
    /// Delay between numbers when calling automatically
    pub auto_call_interval: Duration,
    /// Fixed seed for the pool shuffle; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            announcement_mode: AnnouncementMode::Auto,
            auto_call_interval: Duration::from_secs(3),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.auto_call_interval.is_zero() {
            return Err(GameError::config("Auto call interval must be greater than 0"));
        }

        Ok(())
    }
}
