//! Quest Pool Manager
//!
//! Each NPC keeps a small buffer of generated, not yet accepted quests.
//! Quests are never removed on read: whatever the player has already taken is
//! skipped by id.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::definition::Quest;
use super::templates::QuestLibrary;
use crate::npc::NpcCatalog;
use crate::player::{PlayerStats, QuestHolder};

pub const DEFAULT_POOL_CAPACITY: usize = 3;

pub struct QuestPoolManager {
    pools: HashMap<String, Vec<Quest>>,
    library: QuestLibrary,
    catalog: Arc<NpcCatalog>,
    capacity: usize,
}

impl QuestPoolManager {
    pub fn new(catalog: Arc<NpcCatalog>, library: QuestLibrary, capacity: usize) -> Self {
        Self {
            pools: HashMap::new(),
            library,
            catalog,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace an NPC's pool with freshly generated quests
    pub fn refresh(&mut self, npc_id: &str, player: Option<&PlayerStats>) {
        let role = self.catalog.role_of(npc_id);
        let kinds = role.quest_kinds();

        let pool: Vec<Quest> = (0..self.capacity)
            .map(|_| {
                let kind = self.library.choose_kind(kinds);
                let difficulty = self.library.random_difficulty();
                self.library.generate(kind, difficulty, player)
            })
            .collect();

        info!("Refreshed quest pool for {} ({}): {} quests", npc_id, role.as_str(), pool.len());
        self.pools.insert(npc_id.to_string(), pool);
    }

    /// First pooled quest the player has not taken yet, without generating
    pub fn peek_available<P: QuestHolder + ?Sized>(&mut self, npc_id: &str, player: &P) -> Option<&Quest> {
        self.ensure_pool(npc_id, player.stats());
        self.pools
            .get(npc_id)?
            .iter()
            .find(|q| !player.has_claimed(&q.id))
    }

    /// A quest the player can take from this NPC; generates one if needed
    pub fn get_available<P: QuestHolder + ?Sized>(&mut self, npc_id: &str, player: &P) -> Quest {
        if let Some(quest) = self.peek_available(npc_id, player) {
            return quest.clone();
        }

        let kinds = self.catalog.role_of(npc_id).quest_kinds();
        let kind = self.library.choose_kind(kinds);
        let difficulty = self.library.random_difficulty();
        let quest = self.library.generate(kind, difficulty, Some(player.stats()));

        debug!("Pool for {} exhausted, appended quest {}", npc_id, quest.id);
        self.pools.entry(npc_id.to_string()).or_default().push(quest.clone());
        quest
    }

    /// Current pool contents for an NPC, if it has been referenced
    pub fn pool(&self, npc_id: &str) -> Option<&[Quest]> {
        self.pools.get(npc_id).map(Vec::as_slice)
    }

    fn ensure_pool(&mut self, npc_id: &str, player: &PlayerStats) {
        if !self.pools.contains_key(npc_id) {
            self.refresh(npc_id, Some(player));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::NpcRole;
    use crate::player::Player;

    fn manager(seed: u64) -> QuestPoolManager {
        QuestPoolManager::new(
            Arc::new(NpcCatalog::with_defaults()),
            QuestLibrary::new(Some(seed)),
            DEFAULT_POOL_CAPACITY,
        )
    }

    #[test]
    fn test_refresh_fills_to_capacity_with_role_kinds() {
        let mut pools = manager(1);
        pools.refresh("old_tom", None);

        let pool = pools.pool("old_tom").unwrap();
        assert_eq!(pool.len(), 3);
        for quest in pool {
            assert!(NpcRole::Fisherman.quest_kinds().contains(&quest.kind()));
        }
    }

    #[test]
    fn test_refresh_replaces_pool() {
        let mut pools = manager(2);
        pools.refresh("elder_rowan", None);
        let before: Vec<_> = pools.pool("elder_rowan").unwrap().iter().map(|q| q.id.clone()).collect();
        pools.refresh("elder_rowan", None);
        let after = pools.pool("elder_rowan").unwrap();
        assert_eq!(after.len(), 3);
        assert!(after.iter().all(|q| !before.contains(&q.id)));
    }

    #[test]
    fn test_get_available_is_stable_without_changes() {
        let mut pools = manager(3);
        let player = Player::new("Ana", 0);

        let first = pools.get_available("old_tom", &player);
        let second = pools.get_available("old_tom", &player);
        assert_eq!(first.id, second.id);
        assert_eq!(pools.pool("old_tom").unwrap().len(), 3);
    }

    #[test]
    fn test_accepted_quests_are_skipped_not_removed() {
        let mut pools = manager(4);
        let mut player = Player::new("Ana", 0);

        let first = pools.get_available("elder_rowan", &player);
        player.add_quest(first.clone());

        let next = pools.get_available("elder_rowan", &player);
        assert_ne!(next.id, first.id);
        assert!(pools.pool("elder_rowan").unwrap().iter().any(|q| q.id == first.id));
    }

    #[test]
    fn test_exhausted_pool_appends_one_quest() {
        let mut pools = manager(5);
        let mut player = Player::new("Ana", 0);

        for _ in 0..3 {
            let quest = pools.get_available("marina", &player);
            player.add_quest(quest);
        }
        assert!(pools.peek_available("marina", &player).is_none());

        let extra = pools.get_available("marina", &player);
        assert!(!player.has_claimed(&extra.id));
        assert_eq!(pools.pool("marina").unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_npc_gets_generic_pool() {
        let mut pools = manager(6);
        let player = Player::new("Ana", 0);
        let quest = pools.get_available("stranger", &player);
        assert!(NpcRole::Generic.quest_kinds().contains(&quest.kind()));
    }
}
