//! Dialogue System Module
//!
//! One conversation at a time: greeting, role menus, quest narration and the
//! accept/decline offer.

pub mod error;
mod handlers;
pub mod line;
pub mod orchestrator;

pub use error::DialogueError;
pub use line::{ConversationPhase, DialogueLine, DialogueState, MenuStage, Stage};
pub use orchestrator::{ConversationOrchestrator, ACCEPT_CHOICE, CONTINUE_INPUT};
