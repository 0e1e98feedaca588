//! Configuration loading and the typed option set.
//!
//! The canonical configuration lives in `autoshaker-config.yaml`. Every
//! field has a default, so a missing file or an empty document yields a
//! working configuration. Values are read by the engine every tick; the
//! activation toggle and an external settings surface may change them at
//! runtime.
//!
//! ```yaml
//! is_shaker_active: true
//! use_player_magnetism: false
//! shake_distance: 2
//! shake_regular_trees: true
//! shake_fruit_trees: true
//! shake_bushes: true
//! shake_tea_bushes: true
//! fruits_ready_to_shake: 1
//! toggle_shaker: "LeftShift + H"
//! ```

use std::path::Path;

use autoshaker_types::tile_radius_from_magnetism;
use serde::{Deserialize, Serialize};

use crate::input::KeybindList;

/// Maximum fruit a fruit tree can carry; the threshold may not exceed it.
pub const MAX_FRUITS_READY_TO_SHAKE: u32 = 3;

/// Errors that can occur when loading, validating, or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("config file I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse or emit YAML.
    #[error("config YAML error: {source}")]
    Yaml {
        /// The underlying YAML error.
        source: serde_yml::Error,
    },

    /// A value is out of its accepted range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// The recognized option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShakerConfig {
    /// Global on/off switch, flipped by the toggle keybind.
    #[serde(default = "default_true")]
    pub is_shaker_active: bool,

    /// Derive the radius from the agent's magnetism instead of
    /// `shake_distance`.
    #[serde(default)]
    pub use_player_magnetism: bool,

    /// Fixed scan radius in tiles.
    #[serde(default = "default_shake_distance")]
    pub shake_distance: u32,

    /// Shake regular trees for seeds.
    #[serde(default = "default_true")]
    pub shake_regular_trees: bool,

    /// Shake fruit trees.
    #[serde(default = "default_true")]
    pub shake_fruit_trees: bool,

    /// Shake bushes (category switch).
    #[serde(default = "default_true")]
    pub shake_bushes: bool,

    /// Shake tea bushes (sub-switch; bushes need both).
    #[serde(default = "default_true")]
    pub shake_tea_bushes: bool,

    /// Minimum ripe fruit before a fruit tree is shaken.
    #[serde(default = "default_fruits_ready_to_shake")]
    pub fruits_ready_to_shake: u32,

    /// Keybind that flips `is_shaker_active`.
    #[serde(default = "default_toggle_shaker")]
    pub toggle_shaker: KeybindList,
}

impl Default for ShakerConfig {
    fn default() -> Self {
        Self {
            is_shaker_active: true,
            use_player_magnetism: false,
            shake_distance: default_shake_distance(),
            shake_regular_trees: true,
            shake_fruit_trees: true,
            shake_bushes: true,
            shake_tea_bushes: true,
            fruits_ready_to_shake: default_fruits_ready_to_shake(),
            toggle_shaker: default_toggle_shaker(),
        }
    }
}

impl ShakerConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] or [`ConfigError::Invalid`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `fruits_ready_to_shake` is
    /// outside `1..=MAX_FRUITS_READY_TO_SHAKE`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_FRUITS_READY_TO_SHAKE).contains(&self.fruits_ready_to_shake) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "fruits_ready_to_shake must be within 1..={MAX_FRUITS_READY_TO_SHAKE}, got {}",
                    self.fruits_ready_to_shake
                ),
            });
        }
        Ok(())
    }

    /// Whether at least one category can ever be shaken.
    pub const fn any_category_enabled(&self) -> bool {
        self.shake_regular_trees || self.shake_fruit_trees || self.shake_bushes
    }

    /// Whether bushes pass the category switches.
    pub const fn bushes_enabled(&self) -> bool {
        self.shake_bushes && self.shake_tea_bushes
    }

    /// Scan radius in tiles for an agent with the given magnetic radius.
    pub fn effective_radius(&self, magnetic_radius: u32) -> i32 {
        if self.use_player_magnetism {
            tile_radius_from_magnetism(magnetic_radius)
        } else {
            i32::try_from(self.shake_distance).unwrap_or(i32::MAX)
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (used by serde)
// ---------------------------------------------------------------------------

const fn default_true() -> bool {
    true
}

const fn default_shake_distance() -> u32 {
    2
}

const fn default_fruits_ready_to_shake() -> u32 {
    1
}

fn default_toggle_shaker() -> KeybindList {
    KeybindList::parse("LeftShift + H").unwrap_or_default()
}
