//! Game configuration loaded from TOML.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use dungeon_rules::CombatRules;

use crate::error::DungeonError;
use crate::generation::{Connectivity, MIN_ROOMS};

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "dungeon.toml";

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Where the save file is written and read.
    pub save_path: PathBuf,
    /// Smallest dungeon a player may ask for.
    pub min_rooms: u32,
    /// Largest dungeon a player may ask for.
    pub max_rooms: u32,
    /// Backbone policy of the graph generator.
    pub connectivity: Connectivity,
    /// Optional combat behavior.
    pub combat: CombatRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("dungeon_save.dat"),
            min_rooms: MIN_ROOMS,
            max_rooms: 20,
            connectivity: Connectivity::default(),
            combat: CombatRules::default(),
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DungeonError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load the explicit file if given, else `dungeon.toml` if it exists,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DungeonError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), DungeonError> {
        if self.min_rooms < MIN_ROOMS {
            return Err(DungeonError::InvalidConfig(format!(
                "min_rooms must be at least {MIN_ROOMS}, got {}",
                self.min_rooms
            )));
        }
        if self.max_rooms < self.min_rooms {
            return Err(DungeonError::InvalidConfig(format!(
                "max_rooms ({}) is below min_rooms ({})",
                self.max_rooms, self.min_rooms
            )));
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(DungeonError::InvalidConfig("save_path is empty".to_string()));
        }
        Ok(())
    }

    /// Check a requested room count against the configured bounds.
    pub fn check_room_count(&self, requested: i64) -> Result<u32, DungeonError> {
        if requested < i64::from(self.min_rooms) || requested > i64::from(self.max_rooms) {
            return Err(DungeonError::InvalidRoomCount {
                requested,
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        Ok(requested as u32)
    }
}
