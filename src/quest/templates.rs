//! Quest Template Library
//!
//! Turns a quest kind, a difficulty and (optionally) the player's progress
//! into a concrete quest. Two random sources are kept apart: a seedable
//! generator drives everything that affects gameplay (parameters, rewards,
//! kind and difficulty picks), while titles and narration use the thread RNG.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::definition::{Difficulty, Objective, Quest, QuestId, QuestKind, Reward};
use crate::npc::NpcRole;
use crate::player::PlayerStats;
use crate::quest::Rarity;

// ============================================================================
// Presets
// ============================================================================

/// Required catch lengths in cm
pub const LENGTH_PRESETS: [u32; 8] = [25, 30, 35, 40, 45, 50, 60, 70];
/// Added to the player's best when every preset is already beaten
pub const LENGTH_INCREMENT: RangeInclusive<u32> = 5..=15;
/// Number of additional fishing attempts requested
pub const ATTEMPT_PRESETS: [u32; 5] = [3, 5, 8, 10, 15];
pub const RARITY_PRESETS: [Rarity; 4] = [Rarity::Uncommon, Rarity::Rare, Rarity::Epic, Rarity::Legendary];
pub const TALK_TARGETS: [NpcRole; 3] = [NpcRole::Trader, NpcRole::Fisherman, NpcRole::QuestGiver];
pub const FISH_SPECIES: [&str; 6] = ["trout", "salmon", "carp", "pike", "bass", "mackerel"];

pub const BASE_MONEY: [u32; 4] = [50, 75, 100, 150];
pub const BASE_ITEMS: [(&str, u32); 5] = [
    ("bait", 5),
    ("worms", 3),
    ("shiny_lure", 1),
    ("fishing_net", 1),
    ("kelp_tea", 2),
];

/// Money bonus per required cm of length
const LENGTH_BONUS_PER_CM: f32 = 0.02;
/// Money bonus per required repeat
const ATTEMPT_BONUS_PER_REPEAT: f32 = 0.10;

// ============================================================================
// Flavor text
// ============================================================================

struct Flavor {
    titles: &'static [&'static str],
    descriptions: &'static [&'static str],
    openings: &'static [&'static str],
    asides: &'static [&'static str],
    /// Last narration line; `{target}` is replaced by the parameter
    asks: &'static [&'static str],
}

const SHARED_OPENINGS: &[&str] = &[
    "You look like someone who knows their way around a rod.",
    "Got a minute? I've been meaning to ask somebody.",
    "Funny you should stop by, I was just thinking about you.",
];

const SHARED_ASIDES: &[&str] = &[
    "I'd do it myself, but my knees aren't what they used to be.",
    "Don't tell the others I asked, they'll want in on it.",
    "The pay's fair, I promise you that.",
];

fn flavor(kind: QuestKind) -> Flavor {
    match kind {
        QuestKind::AttemptCount => Flavor {
            titles: &["Practice Makes Perfect", "Cast Away", "Line After Line"],
            descriptions: &["Keep casting until your arm remembers how."],
            openings: SHARED_OPENINGS,
            asides: &["Folks say patience is the whole trick.", "Every cast teaches you something."],
            asks: &[
                "Go fish {target} more times and come back to me.",
                "Cast your line {target} more times. That's all I ask.",
            ],
        },
        QuestKind::CatchLength => Flavor {
            titles: &["The Big One", "Measure Twice", "A Fish Worth Telling About"],
            descriptions: &["Land a fish big enough to make the old-timers jealous."],
            openings: SHARED_OPENINGS,
            asides: &[
                "There's a whopper out there, I've seen its shadow.",
                "Small fry won't cut it this time.",
            ],
            asks: &[
                "Bring in a fish at least {target}cm long.",
                "I want to see a catch of {target}cm or more.",
            ],
        },
        QuestKind::CatchRarity => Flavor {
            titles: &["Something Special", "Rare Waters", "The Collector"],
            descriptions: &["Find a fish most anglers only hear about."],
            openings: SHARED_OPENINGS,
            asides: &[
                "A collector up the coast pays well for unusual fish.",
                "The odd ones hide where the current bends.",
            ],
            asks: &[
                "Catch me a fish of {target} quality or better.",
                "Find a {target} fish and you'll be well rewarded.",
            ],
        },
        QuestKind::TalkToNpc => Flavor {
            titles: &["Making Friends", "A Word in Passing", "Village Errand"],
            descriptions: &["Get to know the people around here."],
            openings: SHARED_OPENINGS,
            asides: SHARED_ASIDES,
            asks: &[
                "Go and have a chat with the {target}.",
                "Pay the {target} a visit for me, would you?",
            ],
        },
        QuestKind::SellFish => Flavor {
            titles: &["Market Day", "Fresh Catch", "Supply and Demand"],
            descriptions: &["The market needs fish and the trader needs stock."],
            openings: SHARED_OPENINGS,
            asides: SHARED_ASIDES,
            asks: &[
                "Sell some fish at the market, {target} if you can find it.",
                "The trader's short on {target}. Sell them some fish.",
            ],
        },
    }
}

fn pick<'a>(pool: &'a [&'a str], rng: &mut impl Rng) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

// ============================================================================
// Library
// ============================================================================

/// Procedural quest generator
#[derive(Debug, Clone)]
pub struct QuestLibrary {
    rng: StdRng,
}

impl QuestLibrary {
    /// Seeded for reproducible parameters, or from entropy when `seed` is None
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Uniform pick over the three difficulty levels
    pub fn random_difficulty(&mut self) -> Difficulty {
        Difficulty::ALL[self.rng.gen_range(0..Difficulty::ALL.len())]
    }

    /// Uniform pick from a preference list; attempt-count when it is empty
    pub fn choose_kind(&mut self, kinds: &[QuestKind]) -> QuestKind {
        kinds.choose(&mut self.rng).copied().unwrap_or(QuestKind::AttemptCount)
    }

    /// Generate a quest of the given kind
    ///
    /// With a progress snapshot, numeric targets are always beyond what the
    /// player has already achieved.
    pub fn generate(&mut self, kind: QuestKind, difficulty: Difficulty, player: Option<&PlayerStats>) -> Quest {
        let objective = self.objective_for(kind, player);
        let rewards = self.rewards_for(&objective, difficulty);

        let mut flavor_rng = rand::thread_rng();
        let text = flavor(kind);
        let target = target_text(&objective);

        let mut dialogue = vec![pick(text.openings, &mut flavor_rng).to_string()];
        dialogue.push(pick(text.asides, &mut flavor_rng).to_string());
        if flavor_rng.gen_bool(0.5) {
            dialogue.push(pick(SHARED_ASIDES, &mut flavor_rng).to_string());
        }
        dialogue.push(pick(text.asks, &mut flavor_rng).replace("{target}", &target));

        let quest = Quest {
            id: QuestId::generate(kind),
            difficulty,
            title: pick(text.titles, &mut flavor_rng).to_string(),
            description: format!("{} {}.", pick(text.descriptions, &mut flavor_rng), objective.describe()),
            dialogue,
            objective,
            rewards,
            is_active: false,
            is_completed: false,
            accepted_at: None,
            completed_at: None,
        };

        debug!(
            "Generated {} quest {} ({}): {:?}, reward {}",
            difficulty.as_str(),
            quest.id,
            quest.title,
            quest.objective,
            quest.rewards.summary()
        );
        quest
    }

    fn objective_for(&mut self, kind: QuestKind, player: Option<&PlayerStats>) -> Objective {
        match kind {
            QuestKind::AttemptCount => {
                let count = ATTEMPT_PRESETS[self.rng.gen_range(0..ATTEMPT_PRESETS.len())];
                let baseline = player.map_or(0, |p| p.fishing_attempts);
                Objective::AttemptCount {
                    count,
                    target: baseline + count,
                }
            }
            QuestKind::CatchLength => {
                let best = player.map(|p| p.max_fish_length);
                let min_length_cm = stretch(&mut self.rng, &LENGTH_PRESETS, best).unwrap_or_else(|| {
                    let best = best.unwrap_or_default();
                    best + self.rng.gen_range(LENGTH_INCREMENT)
                });
                Objective::CatchLength { min_length_cm }
            }
            QuestKind::CatchRarity => {
                // Nothing landed yet filters nothing out.
                let best = player.and_then(|p| p.best_rarity_ever);
                let min_rarity = stretch(&mut self.rng, &RARITY_PRESETS, best)
                    .unwrap_or_else(|| best.map_or(Rarity::Uncommon, |b| b.next()));
                Objective::CatchRarity { min_rarity }
            }
            QuestKind::TalkToNpc => {
                let unvisited: Vec<NpcRole> = match player {
                    Some(stats) => TALK_TARGETS.iter().copied().filter(|r| !stats.has_talked_to(*r)).collect(),
                    None => Vec::new(),
                };
                let pool: &[NpcRole] = if unvisited.is_empty() { &TALK_TARGETS } else { &unvisited };
                let role = pool.choose(&mut self.rng).copied().unwrap_or(NpcRole::Trader);
                Objective::TalkToNpc { role }
            }
            QuestKind::SellFish => Objective::SellFish {
                fish_type: pick(&FISH_SPECIES, &mut self.rng).to_string(),
            },
        }
    }

    fn rewards_for(&mut self, objective: &Objective, difficulty: Difficulty) -> Reward {
        let base_money = BASE_MONEY[self.rng.gen_range(0..BASE_MONEY.len())];
        let bonus = match objective {
            Objective::CatchLength { min_length_cm } => 1.0 + LENGTH_BONUS_PER_CM * *min_length_cm as f32,
            Objective::AttemptCount { count, .. } => 1.0 + ATTEMPT_BONUS_PER_REPEAT * *count as f32,
            Objective::CatchRarity { min_rarity } => min_rarity.reward_multiplier(),
            Objective::TalkToNpc { .. } | Objective::SellFish { .. } => 1.0,
        };
        let money = (base_money as f32 * difficulty.money_multiplier() * bonus).round() as u32;

        let entries = self.rng.gen_range(1..=2);
        let items: BTreeMap<String, u32> = BASE_ITEMS
            .choose_multiple(&mut self.rng, entries)
            .map(|(item, count)| {
                let scaled = (*count as f32 * difficulty.item_multiplier()).round() as u32;
                (item.to_string(), scaled.max(1))
            })
            .collect();

        Reward {
            money: money.max(1),
            items,
        }
    }
}

impl Default for QuestLibrary {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A preset strictly above `best`, or any preset when there is no best
///
/// Returns None only when every preset is already matched or beaten.
fn stretch<T: Copy + Ord>(rng: &mut StdRng, presets: &[T], best: Option<T>) -> Option<T> {
    let candidates: Vec<T> = presets
        .iter()
        .copied()
        .filter(|p| best.is_none_or(|b| *p > b))
        .collect();
    candidates.choose(rng).copied()
}

fn target_text(objective: &Objective) -> String {
    match objective {
        Objective::AttemptCount { count, .. } => count.to_string(),
        Objective::CatchLength { min_length_cm } => min_length_cm.to_string(),
        Objective::CatchRarity { min_rarity } => min_rarity.as_str().to_string(),
        Objective::TalkToNpc { role } => role.display_name().to_string(),
        Objective::SellFish { fish_type } => fish_type.clone(),
    }
}
