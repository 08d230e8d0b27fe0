//! Quest Progress Evaluation
//!
//! Pure checks of a quest's objective against a progress snapshot. Nothing
//! here mutates state; callers own the active -> completed transition.

use super::definition::{Objective, Quest, QuestId, Rarity};
use crate::player::PlayerStats;

/// Whether the quest's objective is met by the given progress
pub fn is_satisfied(quest: &Quest, stats: &PlayerStats) -> bool {
    match &quest.objective {
        Objective::AttemptCount { target, .. } => stats.fishing_attempts >= *target,
        Objective::CatchLength { min_length_cm } => stats.max_fish_length >= *min_length_cm,
        Objective::CatchRarity { min_rarity } => {
            let holds_tier = stats.caught.iter().any(|c| c.rarity >= *min_rarity);
            // Only the rare tier also counts the historical counter.
            holds_tier || (*min_rarity == Rarity::Rare && stats.rare_fish_caught > 0)
        }
        Objective::TalkToNpc { role } => stats.has_talked_to(*role),
        Objective::SellFish { .. } => stats.has_sold_fish,
    }
}

/// Ids of every active, not yet completed quest whose objective is met
pub fn satisfied_quests(quests: &[Quest], stats: &PlayerStats) -> Vec<QuestId> {
    quests
        .iter()
        .filter(|q| q.is_active && !q.is_completed)
        .filter(|q| is_satisfied(q, stats))
        .map(|q| q.id.clone())
        .collect()
}
