//! Tunable game constants.
//!
//! `GameConfig::default()` reproduces the classic board: a 700x600 surface,
//! 40px markers, a 100ms clock tick and a 200ms flash before a clicked marker
//! disappears. With the `serde_json` feature a config can be loaded from JSON
//! (missing fields fall back to the defaults).

use crate::error::ConfigError;

/// Play surface width in CSS pixels.
pub const SURFACE_WIDTH: f64 = 700.0;
/// Play surface height in CSS pixels.
pub const SURFACE_HEIGHT: f64 = 600.0;
/// Side length of the square marker footprint.
pub const TARGET_SIZE: f64 = 40.0;
/// Wall-clock period of one timer tick. Each tick adds one tenth of a second.
pub const TICK_MS: u32 = 100;
/// Delay between a correct click and removal of the marker.
pub const REMOVAL_DELAY_MS: u32 = 200;
/// Stacking base; a marker's z-index is `MAX_STACK_PRIORITY - id`.
pub const MAX_STACK_PRIORITY: i32 = 100;
/// Largest count a round accepts.
pub const MAX_TARGETS: u32 = 1_000;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub surface_width: f64,
    pub surface_height: f64,
    pub target_size: f64,
    pub tick_ms: u32,
    pub removal_delay_ms: u32,
    pub max_stack_priority: i32,
    pub max_targets: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            target_size: TARGET_SIZE,
            tick_ms: TICK_MS,
            removal_delay_ms: REMOVAL_DELAY_MS,
            max_stack_priority: MAX_STACK_PRIORITY,
            max_targets: MAX_TARGETS,
        }
    }
}

impl GameConfig {
    /// Reject values the layout or scheduler cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("target_size", self.target_size),
        ];
        for (field, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroPeriod { field: "tick_ms" });
        }
        if self.max_targets == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_targets" });
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
