use serde::{Deserialize, Serialize};

use crate::quest::Quest;

/// One line of dialogue for the UI to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    /// Selectable options; empty when the line only needs acknowledging
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl DialogueLine {
    pub fn say(speaker: &str, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.to_string(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    pub fn ask<S: Into<String>>(speaker: &str, text: impl Into<String>, choices: impl IntoIterator<Item = S>) -> Self {
        Self {
            speaker: speaker.to_string(),
            text: text.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// Nested menu position; only traders go below `Main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStage {
    Main,
    Shop,
    Sell,
}

#[derive(Debug, Clone)]
pub enum Stage {
    Menu(MenuStage),
    /// Stepping through a quest's scripted lines
    QuestNarration { quest: Quest, line: usize },
    /// Waiting for accept (choice 0) or decline
    QuestOffer { quest: Quest },
}

/// Coarse conversation phase, for callers that gate input on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    Idle,
    Menu,
    QuestNarration,
    QuestOffer,
}

/// Transient record of the one open conversation
#[derive(Debug, Clone)]
pub struct DialogueState {
    pub npc_id: String,
    pub stage: Stage,
}

impl DialogueState {
    pub fn new(npc_id: &str, stage: Stage) -> Self {
        Self {
            npc_id: npc_id.to_string(),
            stage,
        }
    }

    /// The quest being narrated or offered, if any
    pub fn quest(&self) -> Option<&Quest> {
        match &self.stage {
            Stage::QuestNarration { quest, .. } | Stage::QuestOffer { quest } => Some(quest),
            Stage::Menu(_) => None,
        }
    }

    /// Index of the narration line currently shown
    pub fn line_index(&self) -> Option<usize> {
        match self.stage {
            Stage::QuestNarration { line, .. } => Some(line),
            _ => None,
        }
    }

    pub fn menu_stage(&self) -> Option<MenuStage> {
        match self.stage {
            Stage::Menu(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn is_quest_offer(&self) -> bool {
        matches!(self.stage, Stage::QuestOffer { .. })
    }

    pub fn phase(&self) -> ConversationPhase {
        match self.stage {
            Stage::Menu(_) => ConversationPhase::Menu,
            Stage::QuestNarration { .. } => ConversationPhase::QuestNarration,
            Stage::QuestOffer { .. } => ConversationPhase::QuestOffer,
        }
    }
}
