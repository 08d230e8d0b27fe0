//! Shop Definition Structures
//!
//! Stock tables for trader NPCs.

use serde::{Deserialize, Serialize};

/// A trader's stock with prices and restock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDefinition {
    pub id: String,
    pub display_name: String,
    pub stock: Vec<ShopStockItem>,
}

/// An item stocked in a shop with price, quantity and restock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopStockItem {
    pub item_id: String,
    /// Shown in the shop menu; falls back to the item id
    #[serde(default)]
    pub display_name: Option<String>,
    pub price: u32,
    pub max_quantity: u32,
    #[serde(default)]
    pub restock_rate: u32,
    #[serde(skip)]
    pub current_quantity: u32,
}

impl ShopStockItem {
    pub fn new(item_id: &str, display_name: &str, price: u32, max_quantity: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            display_name: Some(display_name.to_string()),
            price,
            max_quantity,
            restock_rate: 1,
            current_quantity: max_quantity,
        }
    }

    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.item_id)
    }

    pub fn in_stock(&self) -> bool {
        self.current_quantity > 0
    }

    /// Menu label, e.g. "Bait (5g)"
    pub fn menu_label(&self) -> String {
        if self.in_stock() {
            format!("{} ({}g)", self.name(), self.price)
        } else {
            format!("{} (sold out)", self.name())
        }
    }
}

impl ShopDefinition {
    /// Initialize stock quantities to their maximum values
    pub fn initialize_stock(&mut self) {
        for item in &mut self.stock {
            item.current_quantity = item.max_quantity;
        }
    }

    /// Restock all items by their restock_rate, capped at max_quantity
    pub fn restock(&mut self) {
        for item in &mut self.stock {
            item.current_quantity = (item.current_quantity + item.restock_rate).min(item.max_quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restock_caps_at_max() {
        let mut shop = ShopDefinition {
            id: "s".into(),
            display_name: "S".into(),
            stock: vec![ShopStockItem::new("bait", "Bait", 5, 3)],
        };
        shop.stock[0].current_quantity = 0;
        assert_eq!(shop.stock[0].menu_label(), "Bait (sold out)");

        shop.restock();
        assert_eq!(shop.stock[0].current_quantity, 1);
        for _ in 0..5 {
            shop.restock();
        }
        assert_eq!(shop.stock[0].current_quantity, 3);
        assert_eq!(shop.stock[0].menu_label(), "Bait (5g)");
    }
}
