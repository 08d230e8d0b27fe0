//! Shop Registry
//!
//! Loads and caches trader stock tables from TOML files.

use super::definition::{ShopDefinition, ShopStockItem};
use crate::error::ContentError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Registry for all shop definitions
#[derive(Debug, Clone)]
pub struct ShopRegistry {
    shops: HashMap<String, ShopDefinition>,
}

impl ShopRegistry {
    /// Create a new empty shop registry
    pub fn new() -> Self {
        Self {
            shops: HashMap::new(),
        }
    }

    /// The stock harbor tackle shop
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(ShopDefinition {
            id: "harbor_tackle".to_string(),
            display_name: "Harbor Tackle".to_string(),
            stock: vec![
                ShopStockItem::new("bait", "Bait", 5, 20),
                ShopStockItem::new("shiny_lure", "Shiny Lure", 40, 5),
                ShopStockItem::new("sturdy_rod", "Sturdy Rod", 250, 1),
            ],
        });
        registry
    }

    /// Load all shop definitions from `<data_dir>/shops`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), ContentError> {
        let path = data_dir.join("shops");
        if !path.exists() {
            warn!("Shop directory does not exist: {:?}", path);
            return Ok(());
        }

        for entry in fs::read_dir(&path).map_err(|e| ContentError::io(&path, e))? {
            let entry = entry.map_err(|e| ContentError::io(&path, e))?;
            let file_path = entry.path();

            if file_path.extension().and_then(|s| s.to_str()) == Some("toml") {
                let contents = fs::read_to_string(&file_path).map_err(|e| ContentError::io(&file_path, e))?;

                let mut shop: ShopDefinition =
                    toml::from_str(&contents).map_err(|e| ContentError::parse(&file_path, e))?;

                shop.initialize_stock();

                if self.shops.contains_key(&shop.id) {
                    warn!("Duplicate shop ID '{}' in {:?}, overwriting", shop.id, file_path);
                }

                self.shops.insert(shop.id.clone(), shop);
            }
        }

        info!("Loaded {} shop definitions", self.shops.len());
        Ok(())
    }

    pub fn insert(&mut self, shop: ShopDefinition) {
        self.shops.insert(shop.id.clone(), shop);
    }

    /// Get a shop definition by ID
    pub fn get(&self, shop_id: &str) -> Option<&ShopDefinition> {
        self.shops.get(shop_id)
    }

    /// Get a mutable shop definition by ID
    pub fn get_mut(&mut self, shop_id: &str) -> Option<&mut ShopDefinition> {
        self.shops.get_mut(shop_id)
    }

    /// Restock every shop once
    pub fn restock_all(&mut self) {
        for shop in self.shops.values_mut() {
            shop.restock();
        }
    }

    /// Get the number of shops in the registry
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

impl Default for ShopRegistry {
    fn default() -> Self {
        Self::new()
    }
}
