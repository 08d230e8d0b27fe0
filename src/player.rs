//! Player Progress Tracking
//!
//! The counters the quest engine reads, the `QuestHolder` seam the dialogue
//! engine mutates through, and a reference player that owns both.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::npc::NpcRole;
use crate::quest::evaluator;
use crate::quest::{Quest, QuestId, Rarity};

/// A fish currently held by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub species: String,
    pub length_cm: u32,
    pub rarity: Rarity,
}

impl CatchRecord {
    pub fn new(species: &str, length_cm: u32, rarity: Rarity) -> Self {
        Self {
            species: species.to_string(),
            length_cm,
            rarity,
        }
    }
}

/// Read-mostly snapshot of the player's accumulated progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub fishing_attempts: u32,
    /// Longest fish ever landed, in cm
    pub max_fish_length: u32,
    /// Historical count of rare-tier catches; survives selling
    pub rare_fish_caught: u32,
    /// Rarest tier ever landed; survives selling
    pub best_rarity_ever: Option<Rarity>,
    pub talked_to_trader: bool,
    pub talked_to_fisherman: bool,
    pub talked_to_quest_giver: bool,
    pub has_sold_fish: bool,
    /// Fish currently held, cleared when sold
    pub caught: Vec<CatchRecord>,
}

impl PlayerStats {
    /// Whether the player has talked to an NPC of this role
    pub fn has_talked_to(&self, role: NpcRole) -> bool {
        match role {
            NpcRole::Trader => self.talked_to_trader,
            NpcRole::Fisherman => self.talked_to_fisherman,
            NpcRole::QuestGiver => self.talked_to_quest_giver,
            NpcRole::Generic => false,
        }
    }

    /// Set the talked-to flag for a role; generic NPCs have none
    pub fn mark_talked_to(&mut self, role: NpcRole) {
        match role {
            NpcRole::Trader => self.talked_to_trader = true,
            NpcRole::Fisherman => self.talked_to_fisherman = true,
            NpcRole::QuestGiver => self.talked_to_quest_giver = true,
            NpcRole::Generic => {}
        }
    }

    /// Record one cast of the line, with or without a catch
    pub fn record_attempt(&mut self, catch: Option<CatchRecord>) {
        self.fishing_attempts += 1;
        if let Some(catch) = catch {
            self.max_fish_length = self.max_fish_length.max(catch.length_cm);
            self.best_rarity_ever = self.best_rarity_ever.max(Some(catch.rarity));
            if catch.rarity == Rarity::Rare {
                self.rare_fish_caught += 1;
            }
            self.caught.push(catch);
        }
    }
}

/// What the dialogue and quest engines need from the player
pub trait QuestHolder {
    fn stats(&self) -> &PlayerStats;
    fn stats_mut(&mut self) -> &mut PlayerStats;

    fn active_quests(&self) -> &[Quest];
    fn completed_quests(&self) -> &[Quest];

    /// Take on a quest; it becomes active
    fn add_quest(&mut self, quest: Quest);
    /// Move an active quest to the completed set, returning it if found
    fn complete_quest(&mut self, quest_id: &QuestId) -> Option<&Quest>;

    fn money(&self) -> u32;
    fn add_money(&mut self, amount: u32);
    /// Deduct money, returning false (and changing nothing) if short
    fn spend_money(&mut self, amount: u32) -> bool;
    fn add_item(&mut self, item_id: &str, count: u32);

    /// True if the quest is active or already completed
    fn has_claimed(&self, quest_id: &QuestId) -> bool {
        self.active_quests().iter().any(|q| &q.id == quest_id)
            || self.completed_quests().iter().any(|q| &q.id == quest_id)
    }
}

/// Reference player used by the demo and the tests
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub name: String,
    pub stats: PlayerStats,
    pub money: u32,
    /// item id -> count
    pub inventory: HashMap<String, u32>,
    active_quests: Vec<Quest>,
    completed_quests: Vec<Quest>,
}

impl Player {
    pub fn new(name: &str, money: u32) -> Self {
        Self {
            name: name.to_string(),
            money,
            ..Default::default()
        }
    }

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.inventory.get(item_id).copied().unwrap_or(0)
    }

    /// Complete every active quest whose objective is met and pay out rewards
    ///
    /// Call after any state-changing action. Returns the completed ids.
    pub fn check_quests(&mut self) -> Vec<QuestId> {
        let ready = evaluator::satisfied_quests(&self.active_quests, &self.stats);
        for quest_id in &ready {
            let rewards = match self.complete_quest(quest_id) {
                Some(quest) => quest.rewards.clone(),
                None => continue,
            };
            self.add_money(rewards.money);
            for (item_id, count) in &rewards.items {
                self.add_item(item_id, *count);
            }
        }
        ready
    }
}

impl QuestHolder for Player {
    fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    fn active_quests(&self) -> &[Quest] {
        &self.active_quests
    }

    fn completed_quests(&self) -> &[Quest] {
        &self.completed_quests
    }

    fn add_quest(&mut self, mut quest: Quest) {
        if self.has_claimed(&quest.id) {
            return;
        }
        if !quest.is_active {
            quest.accept();
        }
        info!("{} accepted quest '{}' ({})", self.name, quest.title, quest.id);
        self.active_quests.push(quest);
    }

    fn complete_quest(&mut self, quest_id: &QuestId) -> Option<&Quest> {
        let index = self.active_quests.iter().position(|q| &q.id == quest_id)?;
        let mut quest = self.active_quests.remove(index);
        quest.complete();
        info!("{} completed quest '{}' ({})", self.name, quest.title, quest.id);
        self.completed_quests.push(quest);
        self.completed_quests.last()
    }

    fn money(&self) -> u32 {
        self.money
    }

    fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    fn spend_money(&mut self, amount: u32) -> bool {
        if self.money < amount {
            return false;
        }
        self.money -= amount;
        true
    }

    fn add_item(&mut self, item_id: &str, count: u32) {
        *self.inventory.entry(item_id.to_string()).or_insert(0) += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{Difficulty, Objective, Reward};
    use std::collections::BTreeMap;

    fn talk_quest(id: &str) -> Quest {
        let mut items = BTreeMap::new();
        items.insert("bait".to_string(), 2);
        Quest {
            id: QuestId::from(id),
            difficulty: Difficulty::Easy,
            title: "Say Hello".into(),
            description: "Go say hello to the trader.".into(),
            dialogue: vec!["a".into(), "b".into(), "c".into()],
            objective: Objective::TalkToNpc { role: NpcRole::Trader },
            rewards: Reward { money: 40, items },
            is_active: false,
            is_completed: false,
            accepted_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_record_attempt_updates_counters() {
        let mut stats = PlayerStats::default();
        stats.record_attempt(None);
        stats.record_attempt(Some(CatchRecord::new("trout", 42, Rarity::Rare)));
        stats.record_attempt(Some(CatchRecord::new("carp", 30, Rarity::Common)));

        assert_eq!(stats.fishing_attempts, 3);
        assert_eq!(stats.max_fish_length, 42);
        assert_eq!(stats.rare_fish_caught, 1);
        assert_eq!(stats.best_rarity_ever, Some(Rarity::Rare));

        stats.caught.clear();
        assert_eq!(stats.best_rarity_ever, Some(Rarity::Rare));
    }

    #[test]
    fn test_add_quest_marks_active_once() {
        let mut player = Player::new("Ana", 0);
        player.add_quest(talk_quest("q1"));
        player.add_quest(talk_quest("q1"));

        assert_eq!(player.active_quests().len(), 1);
        assert!(player.active_quests()[0].is_active);
        assert!(player.active_quests()[0].accepted_at.is_some());
    }

    #[test]
    fn test_check_quests_completes_and_pays_out() {
        let mut player = Player::new("Ana", 10);
        player.add_quest(talk_quest("q1"));

        assert!(player.check_quests().is_empty());

        player.stats.mark_talked_to(NpcRole::Trader);
        let done = player.check_quests();

        assert_eq!(done, vec![QuestId::from("q1")]);
        assert!(player.active_quests().is_empty());
        assert_eq!(player.money, 50);
        assert_eq!(player.item_count("bait"), 2);
        for quest in player.completed_quests() {
            assert!(quest.is_completed);
            assert!(!quest.is_active);
        }
    }

    #[test]
    fn test_spend_money_refuses_overdraft() {
        let mut player = Player::new("Ana", 5);
        assert!(!player.spend_money(6));
        assert_eq!(player.money, 5);
        assert!(player.spend_money(5));
        assert_eq!(player.money, 0);
    }
}
