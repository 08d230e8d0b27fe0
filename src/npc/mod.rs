pub mod catalog;
pub mod descriptor;

pub use catalog::NpcCatalog;
pub use descriptor::{DialoguePools, NpcDescriptor, NpcRole};
