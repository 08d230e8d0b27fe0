pub mod definition;
pub mod registry;

pub use definition::{ShopDefinition, ShopStockItem};
pub use registry::ShopRegistry;
