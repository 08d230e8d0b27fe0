//! Engine configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ContentError;
use crate::player::CatchRecord;
use crate::quest::{Rarity, DEFAULT_POOL_CAPACITY};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root of `npcs/` and `shops/` content
    pub data_dir: PathBuf,
    /// Quests kept per NPC pool
    pub pool_capacity: usize,
    /// Seed for quest parameters and rewards; entropy when absent
    pub seed: Option<u64>,
    pub fish_prices: FishPrices,
    /// How long a chatter backend may take before the canned line is used
    pub chatter_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            seed: None,
            fish_prices: FishPrices::default(),
            chatter_timeout_ms: 1500,
        }
    }
}

impl EngineConfig {
    /// Load configuration, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| ContentError::parse(path, e))?;
        info!(
            "Loaded config from {:?} (pool capacity {}, seed {:?})",
            path, config.pool_capacity, config.seed
        );
        Ok(config)
    }
}

/// What the trader pays for fish
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishPrices {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
    /// Added per cm of length on top of the rarity base
    pub per_cm: u32,
}

impl Default for FishPrices {
    fn default() -> Self {
        Self {
            common: 5,
            uncommon: 12,
            rare: 30,
            epic: 75,
            legendary: 200,
            per_cm: 1,
        }
    }
}

impl FishPrices {
    pub fn base(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn value_of(&self, catch: &CatchRecord) -> u32 {
        self.base(catch.rarity) + self.per_cm * catch.length_cm
    }

    pub fn total(&self, catches: &[CatchRecord]) -> u32 {
        catches.iter().map(|c| self.value_of(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = EngineConfig::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.pool_capacity, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("engine.toml");
        std::fs::write(
            &path,
            r#"
seed = 42
pool_capacity = 5

[fish_prices]
legendary = 500
"#,
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pool_capacity, 5);
        assert_eq!(config.fish_prices.legendary, 500);
        assert_eq!(config.fish_prices.common, 5);
        assert_eq!(config.chatter_timeout_ms, 1500);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("engine.toml");
        std::fs::write(&path, "pool_capacity = \"lots\"").unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(ContentError::Parse { .. })));
    }

    #[test]
    fn test_fish_value() {
        let prices = FishPrices::default();
        let catches = vec![
            CatchRecord::new("carp", 30, Rarity::Common),
            CatchRecord::new("pike", 50, Rarity::Rare),
        ];
        assert_eq!(prices.value_of(&catches[0]), 35);
        assert_eq!(prices.total(&catches), 35 + 80);
    }
}
