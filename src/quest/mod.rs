//! Quest System Module
//!
//! Procedurally generated side quests: a template library that adapts targets
//! to the player's records, per-NPC pools of offers, and completion checks.

pub mod definition;
pub mod evaluator;
pub mod pool;
pub mod templates;

pub use definition::{Difficulty, Objective, Quest, QuestId, QuestKind, Rarity, Reward};
pub use pool::{QuestPoolManager, DEFAULT_POOL_CAPACITY};
pub use templates::QuestLibrary;
