//! Quest Definition Structures
//!
//! Value types shared by the template library, the pool manager and the
//! progress evaluator. Quests are generated at runtime rather than loaded, so
//! there is no raw/resolved split here.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::npc::NpcRole;

// ============================================================================
// Rarity
// ============================================================================

/// Ordered rarity tiers for caught fish
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Common
    }
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Money multiplier applied to quests that require this tier
    pub fn reward_multiplier(&self) -> f32 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.25,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
        }
    }

    /// Next tier up, saturating at legendary
    pub fn next(&self) -> Self {
        match self {
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic | Rarity::Legendary => Rarity::Legendary,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Difficulty
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn money_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    pub fn item_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }
}

// ============================================================================
// Quest Kinds & Objectives
// ============================================================================

/// The closed set of objective categories a generated quest can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Go fishing N more times
    AttemptCount,
    /// Land a fish at least N cm long
    CatchLength,
    /// Hold a fish of at least the given rarity
    CatchRarity,
    /// Talk to an NPC of a given role
    TalkToNpc,
    /// Sell fish to a trader
    SellFish,
}

impl QuestKind {
    pub const ALL: [QuestKind; 5] = [
        QuestKind::AttemptCount,
        QuestKind::CatchLength,
        QuestKind::CatchRarity,
        QuestKind::TalkToNpc,
        QuestKind::SellFish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestKind::AttemptCount => "attempt_count",
            QuestKind::CatchLength => "catch_length",
            QuestKind::CatchRarity => "catch_rarity",
            QuestKind::TalkToNpc => "talk_to_npc",
            QuestKind::SellFish => "sell_fish",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "attempt_count" | "attempts" | "fish" => Some(QuestKind::AttemptCount),
            "catch_length" | "length" => Some(QuestKind::CatchLength),
            "catch_rarity" | "rarity" => Some(QuestKind::CatchRarity),
            "talk_to_npc" | "talk_to" | "talk" => Some(QuestKind::TalkToNpc),
            "sell_fish" | "sell" => Some(QuestKind::SellFish),
            _ => None,
        }
    }

    /// Parse a kind name, substituting attempt-count for anything unknown
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            debug!("Unknown quest kind '{}', using attempt_count", s);
            QuestKind::AttemptCount
        })
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single objective of a quest together with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Objective {
    AttemptCount {
        /// Number of additional attempts requested
        count: u32,
        /// Absolute attempt counter value that satisfies the quest
        target: u32,
    },
    CatchLength {
        min_length_cm: u32,
    },
    CatchRarity {
        min_rarity: Rarity,
    },
    TalkToNpc {
        role: NpcRole,
    },
    SellFish {
        /// Recorded for flavor; completion does not check it
        fish_type: String,
    },
}

impl Objective {
    pub fn kind(&self) -> QuestKind {
        match self {
            Objective::AttemptCount { .. } => QuestKind::AttemptCount,
            Objective::CatchLength { .. } => QuestKind::CatchLength,
            Objective::CatchRarity { .. } => QuestKind::CatchRarity,
            Objective::TalkToNpc { .. } => QuestKind::TalkToNpc,
            Objective::SellFish { .. } => QuestKind::SellFish,
        }
    }

    /// Short human readable goal, used in offer summaries and quest logs
    pub fn describe(&self) -> String {
        match self {
            Objective::AttemptCount { count, .. } => format!("Go fishing {} more times", count),
            Objective::CatchLength { min_length_cm } => {
                format!("Catch a fish at least {}cm long", min_length_cm)
            }
            Objective::CatchRarity { min_rarity } => {
                format!("Catch a {} (or rarer) fish", min_rarity)
            }
            Objective::TalkToNpc { role } => format!("Talk to the {}", role.display_name()),
            Objective::SellFish { fish_type } => format!("Sell some fish (ideally {})", fish_type),
        }
    }
}

// ============================================================================
// Rewards
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub money: u32,
    /// item id -> count
    pub items: BTreeMap<String, u32>,
}

impl Reward {
    /// "120 gold, 3x bait, 1x lure"
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} gold", self.money)];
        parts.extend(
            self.items
                .iter()
                .map(|(item, count)| format!("{}x {}", count, item.replace('_', " "))),
        );
        parts.join(", ")
    }
}

// ============================================================================
// Quest
// ============================================================================

/// Opaque quest identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(String);

impl QuestId {
    /// Kind-prefixed unique id, e.g. `catch_length-6f1c...`
    pub fn generate(kind: QuestKind) -> Self {
        Self(format!("{}-{}", kind.as_str(), Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A generated side quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub difficulty: Difficulty,
    pub title: String,
    pub description: String,
    /// Narrative lines shown one per continue before the offer
    pub dialogue: Vec<String>,
    pub objective: Objective,
    pub rewards: Reward,
    pub is_active: bool,
    pub is_completed: bool,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn kind(&self) -> QuestKind {
        self.objective.kind()
    }

    /// Mark the quest as taken on by the player
    pub fn accept(&mut self) {
        self.is_active = true;
        self.is_completed = false;
        self.accepted_at = Some(Utc::now());
    }

    /// Mark quest as completed
    pub fn complete(&mut self) {
        self.is_active = false;
        self.is_completed = true;
        self.completed_at = Some(Utc::now());
    }

    /// Neither offered-and-accepted nor finished yet
    pub fn is_open(&self) -> bool {
        !self.is_active && !self.is_completed
    }
}
