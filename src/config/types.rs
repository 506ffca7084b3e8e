use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
///
/// Every section is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub state: StateConfig,
    pub countdown: CountdownConfig,
    pub carousel: CarouselConfig,
    pub ui: UiConfig,
}

/// Where navigation state is kept between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// State file. Defaults to `<data dir>/navtree/state.json`.
    pub path: Option<PathBuf>,
    /// Restore the previous session on startup.
    pub restore: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub ticks: u32,
    pub interval_ms: u64,
}

/// Animated carousel scrolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub animate: bool,
    /// Intermediate positions per scroll (default: 6).
    pub steps: u32,
    /// Delay between intermediate positions in milliseconds (default: 40).
    pub step_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval in milliseconds (default: 250).
    pub tick_rate_ms: u64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: None,
            restore: true,
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            ticks: 10,
            interval_ms: 1000,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            animate: true,
            steps: 6,
            step_ms: 40,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}
