/// Rejected conversation transitions. A rejected call leaves all state as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogueError {
    #[error("A conversation with '{npc_id}' is already active")]
    ConversationAlreadyActive { npc_id: String },
    #[error("No active conversation")]
    NoActiveConversation,
    #[error("Unknown NPC '{0}'")]
    UnknownNpc(String),
    #[error("Active conversation is with '{active}', not '{requested}'")]
    NpcMismatch { active: String, requested: String },
    #[error("Conversation is not narrating a quest")]
    NotNarrating,
    #[error("Conversation is not waiting for a choice")]
    NotAwaitingChoice,
    #[error("Input {0} is neither a choice index nor the continue sentinel")]
    InvalidInput(i32),
    #[error("Choice {index} is out of range ({available} available)")]
    InvalidChoice { index: usize, available: usize },
}
