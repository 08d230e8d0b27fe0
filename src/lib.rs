//! NPC dialogue and procedural quest engine for a fishing game.
//!
//! The world layer hands player input to a [`ConversationOrchestrator`] and
//! renders the [`DialogueLine`]s it returns. Quests come from per-NPC pools
//! filled by the template library and complete through
//! [`Player::check_quests`].

pub mod chatter;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod npc;
pub mod player;
pub mod quest;
pub mod shop;

pub use config::EngineConfig;
pub use dialogue::{ConversationOrchestrator, DialogueError, DialogueLine};
pub use error::ContentError;
pub use player::{CatchRecord, Player, PlayerStats, QuestHolder};
