use std::io::Read;
use std::path::Path;

use crate::engine::spawn::FOUR_PROBABILITY;
use crate::engine::terminal::WIN_TILE;
use crate::engine::{Tile, MAX_TILE};
use crate::error::ConfigError;

/// Engine settings, loadable from TOML. Every key is optional.
///
/// ```toml
/// size = 5
/// win_tile = 4096
/// four_probability = 0.1
/// seed = 42
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "defaults::size")]
    pub size: usize,
    #[serde(default = "defaults::win_tile")]
    pub win_tile: Tile,
    /// Chance a spawned tile is a 4 instead of a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
    /// Seed for the spawn RNG. None draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: defaults::size(),
            win_tile: defaults::win_tile(),
            four_probability: defaults::four_probability(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Read, parse and validate a TOML config file.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::Invalid(format!("size must be at least 2, got {}", self.size)));
        }
        if self.win_tile < 4 || self.win_tile > MAX_TILE || !self.win_tile.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "win_tile must be a power of two >= 4, got {}",
                self.win_tile
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Invalid(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        Ok(())
    }
}

mod defaults {
    use super::*;

    pub fn size() -> usize { 4 }
    pub fn win_tile() -> Tile { WIN_TILE }
    pub fn four_probability() -> f64 { FOUR_PROBABILITY }
}
