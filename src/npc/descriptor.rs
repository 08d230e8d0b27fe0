use serde::{Deserialize, Serialize};

use crate::quest::QuestKind;

// ============================================================================
// Roles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcRole {
    Trader,
    Fisherman,
    QuestGiver,
    Generic,
}

impl Default for NpcRole {
    fn default() -> Self {
        NpcRole::Generic
    }
}

impl NpcRole {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trader" | "merchant" => NpcRole::Trader,
            "fisherman" | "fisher" => NpcRole::Fisherman,
            "quest_giver" | "questgiver" => NpcRole::QuestGiver,
            _ => NpcRole::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NpcRole::Trader => "trader",
            NpcRole::Fisherman => "fisherman",
            NpcRole::QuestGiver => "quest_giver",
            NpcRole::Generic => "generic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NpcRole::Trader => "trader",
            NpcRole::Fisherman => "old fisherman",
            NpcRole::QuestGiver => "village elder",
            NpcRole::Generic => "villager",
        }
    }

    /// Quest kinds this role hands out, in preference order
    pub fn quest_kinds(&self) -> &'static [QuestKind] {
        match self {
            NpcRole::Trader => &[QuestKind::SellFish, QuestKind::TalkToNpc, QuestKind::AttemptCount],
            NpcRole::Fisherman => &[
                QuestKind::CatchLength,
                QuestKind::CatchRarity,
                QuestKind::AttemptCount,
            ],
            NpcRole::QuestGiver => &QuestKind::ALL,
            NpcRole::Generic => &[QuestKind::TalkToNpc, QuestKind::AttemptCount],
        }
    }

    /// Whether NPCs of this role open with a quest when one is waiting
    pub fn offers_quests_by_default(&self) -> bool {
        matches!(self, NpcRole::Fisherman | NpcRole::QuestGiver)
    }
}

// ============================================================================
// Raw TOML Structures (direct deserialization)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDialoguePools {
    pub greetings: Option<Vec<String>>,
    pub tips: Option<Vec<String>>,
    pub brags: Option<Vec<String>>,
    pub farewells: Option<Vec<String>>,
    pub chatter: Option<Vec<String>>,
}

/// NPC descriptor as loaded directly from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawNpcDescriptor {
    pub extends: Option<String>,

    pub display_name: Option<String>,
    pub role: Option<String>,
    pub offers_quests: Option<bool>,
    pub shop_id: Option<String>,

    #[serde(default)]
    pub dialogue: RawDialoguePools,
}

// ============================================================================
// Resolved Structures (after inheritance)
// ============================================================================

/// Flavor text an NPC draws from
#[derive(Debug, Clone, Default)]
pub struct DialoguePools {
    pub greetings: Vec<String>,
    /// Fishing advice handed out from the menu
    pub tips: Vec<String>,
    /// Responses to the player showing off a catch; `{length}` is replaced
    pub brags: Vec<String>,
    pub farewells: Vec<String>,
    /// Ambient one-liners, also the canned fallback for chatter
    pub chatter: Vec<String>,
}

/// Static description of an NPC
#[derive(Debug, Clone)]
pub struct NpcDescriptor {
    pub id: String,
    pub display_name: String,
    pub role: NpcRole,
    pub offers_quests: bool,
    pub shop_id: Option<String>,
    pub dialogue: DialoguePools,
}

impl NpcDescriptor {
    /// Build a descriptor with stock flavor text for its role
    pub fn new(id: &str, display_name: &str, role: NpcRole) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            role,
            offers_quests: role.offers_quests_by_default(),
            shop_id: None,
            dialogue: default_pools(role),
        }
    }

    pub fn with_shop(mut self, shop_id: &str) -> Self {
        self.shop_id = Some(shop_id.to_string());
        self
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Stock flavor pools used when content leaves a pool empty
pub fn default_pools(role: NpcRole) -> DialoguePools {
    let greetings = match role {
        NpcRole::Trader => lines(&[
            "Welcome, welcome! Finest tackle on the coast.",
            "Ah, a customer! Looking to buy or to sell?",
        ]),
        NpcRole::Fisherman => lines(&[
            "Tide's turning. Good day for it.",
            "Hm? Oh, it's you. Caught anything worth talking about?",
        ]),
        NpcRole::QuestGiver => lines(&[
            "Ah, just the angler I was hoping to see.",
            "The village could use a hand these days.",
        ]),
        NpcRole::Generic => lines(&["Lovely weather, isn't it?", "Oh, hello there."]),
    };

    DialoguePools {
        greetings,
        tips: lines(&[
            "Fish bite best at dawn and dusk.",
            "Bigger bait draws bigger fish, but you'll wait longer.",
            "Don't yank the line the moment it twitches. Let it run.",
            "The rare ones like deep water near the rocks.",
        ]),
        brags: lines(&[
            "{length}cm? Not bad. Not bad at all.",
            "A {length}cm catch, eh? I've seen bigger, but not by much.",
        ]),
        farewells: lines(&["Mind the tide.", "See you around.", "Good luck out there."]),
        chatter: lines(&[
            "Gulls are loud today.",
            "Smells like rain.",
            "Heard someone hooked a monster off the pier last week.",
        ]),
    }
}

fn or_default(pool: Option<Vec<String>>, inherited: Option<&Vec<String>>, fallback: Vec<String>) -> Vec<String> {
    pool.filter(|p| !p.is_empty())
        .or_else(|| inherited.cloned())
        .unwrap_or(fallback)
}

impl RawNpcDescriptor {
    /// Merge this raw entry over an optional parent (child overrides parent)
    pub fn resolve(&self, id: &str, parent: Option<&NpcDescriptor>) -> NpcDescriptor {
        let role = self
            .role
            .as_deref()
            .map(NpcRole::from_str)
            .or_else(|| parent.map(|p| p.role))
            .unwrap_or_default();

        let defaults = default_pools(role);
        let pools = parent.map(|p| &p.dialogue);
        let dialogue = DialoguePools {
            greetings: or_default(self.dialogue.greetings.clone(), pools.map(|p| &p.greetings), defaults.greetings),
            tips: or_default(self.dialogue.tips.clone(), pools.map(|p| &p.tips), defaults.tips),
            brags: or_default(self.dialogue.brags.clone(), pools.map(|p| &p.brags), defaults.brags),
            farewells: or_default(self.dialogue.farewells.clone(), pools.map(|p| &p.farewells), defaults.farewells),
            chatter: or_default(self.dialogue.chatter.clone(), pools.map(|p| &p.chatter), defaults.chatter),
        };

        NpcDescriptor {
            id: id.to_string(),
            display_name: self
                .display_name
                .clone()
                .or_else(|| parent.map(|p| p.display_name.clone()))
                .unwrap_or_else(|| id.to_string()),
            role,
            offers_quests: self
                .offers_quests
                .or_else(|| parent.map(|p| p.offers_quests))
                .unwrap_or_else(|| role.offers_quests_by_default()),
            shop_id: self.shop_id.clone().or_else(|| parent.and_then(|p| p.shop_id.clone())),
            dialogue,
        }
    }
}
