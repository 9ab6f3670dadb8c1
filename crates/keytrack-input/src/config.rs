use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file name used when no path is given.
pub const CONFIG_FILE: &str = "keytrack.json";

/// Manager-level keyboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Default window for `just_pressed` queries (microseconds).
    pub just_pressed_rate_us: i64,
    /// Default window for `just_released` queries (microseconds).
    pub just_released_rate_us: i64,
    /// Reject unrecognized and out-of-order events instead of tolerating them.
    pub strict: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            just_pressed_rate_us: 200_000,
            just_released_rate_us: 200_000,
            strict: false,
        }
    }
}

impl InputConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
