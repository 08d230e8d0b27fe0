//! Conversation Orchestrator
//!
//! Owns the single open conversation and routes every player input to the
//! quest-offer flow or to the NPC role's menu handler.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::error::DialogueError;
use super::handlers::Transition;
use super::line::{ConversationPhase, DialogueLine, DialogueState, MenuStage, Stage};
use crate::config::{EngineConfig, FishPrices};
use crate::error::ContentError;
use crate::npc::{NpcCatalog, NpcDescriptor};
use crate::player::QuestHolder;
use crate::quest::{Quest, QuestLibrary, QuestPoolManager};
use crate::shop::ShopRegistry;

pub const ACCEPT_CHOICE: usize = 0;
/// UI sentinel for "no choice": continue narration or close the window
pub const CONTINUE_INPUT: i32 = -1;

pub struct ConversationOrchestrator {
    pub(super) catalog: Arc<NpcCatalog>,
    pub(super) pools: QuestPoolManager,
    pub(super) shops: ShopRegistry,
    pub(super) fish_prices: FishPrices,
    session: Option<DialogueState>,
}

impl ConversationOrchestrator {
    pub fn new(catalog: Arc<NpcCatalog>, pools: QuestPoolManager, shops: ShopRegistry, fish_prices: FishPrices) -> Self {
        Self {
            catalog,
            pools,
            shops,
            fish_prices,
            session: None,
        }
    }

    /// Build the engine from configuration and the content under `data_dir`
    ///
    /// Empty content directories fall back to the built-in cast and shop.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ContentError> {
        let mut catalog = NpcCatalog::new();
        catalog.load_from_directory(&config.data_dir)?;
        if catalog.is_empty() {
            info!("No NPC content found, using built-in catalog");
            catalog = NpcCatalog::with_defaults();
        }

        let mut shops = ShopRegistry::new();
        shops.load_from_directory(&config.data_dir)?;
        if shops.is_empty() {
            shops = ShopRegistry::with_defaults();
        }

        let catalog = Arc::new(catalog);
        let pools = QuestPoolManager::new(
            Arc::clone(&catalog),
            QuestLibrary::new(config.seed),
            config.pool_capacity,
        );
        Ok(Self::new(catalog, pools, shops, config.fish_prices.clone()))
    }

    pub fn catalog(&self) -> &NpcCatalog {
        &self.catalog
    }

    pub fn pools(&self) -> &QuestPoolManager {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> &mut QuestPoolManager {
        &mut self.pools
    }

    pub fn shops_mut(&mut self) -> &mut ShopRegistry {
        &mut self.shops
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> Option<&DialogueState> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> ConversationPhase {
        self.session.as_ref().map_or(ConversationPhase::Idle, DialogueState::phase)
    }

    /// Open a conversation with an NPC
    ///
    /// Quest-giving NPCs with an unclaimed quest go straight into its
    /// narration; everyone else greets the player and shows their menu.
    pub fn start_dialogue<P: QuestHolder + ?Sized>(
        &mut self,
        npc_id: &str,
        player: &mut P,
    ) -> Result<Vec<DialogueLine>, DialogueError> {
        if let Some(active) = &self.session {
            return Err(DialogueError::ConversationAlreadyActive {
                npc_id: active.npc_id.clone(),
            });
        }

        let catalog = Arc::clone(&self.catalog);
        let npc = catalog
            .get(npc_id)
            .ok_or_else(|| DialogueError::UnknownNpc(npc_id.to_string()))?;

        player.stats_mut().mark_talked_to(npc.role);

        if npc.offers_quests {
            if let Some(quest) = self.pools.peek_available(npc_id, &*player).cloned() {
                debug!("{} opens with quest {}", npc_id, quest.id);
                return Ok(vec![self.begin_narration(npc, quest)]);
            }
        }

        let greeting = npc
            .dialogue
            .greetings
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| "Hello.".to_string());

        let menu = self.menu_line(npc, MenuStage::Main, &*player);
        self.session = Some(DialogueState::new(npc_id, Stage::Menu(MenuStage::Main)));
        debug!("Started conversation with {}", npc_id);

        Ok(vec![DialogueLine::say(&npc.display_name, greeting), menu])
    }

    /// Same as `start_dialogue`; the name the world layer uses
    pub fn interact_with_npc<P: QuestHolder + ?Sized>(
        &mut self,
        npc_id: &str,
        player: &mut P,
    ) -> Result<Vec<DialogueLine>, DialogueError> {
        self.start_dialogue(npc_id, player)
    }

    /// Show the next narration line, or the offer once the script runs out
    pub fn continue_dialogue(&mut self) -> Result<Vec<DialogueLine>, DialogueError> {
        let state = self.session.as_mut().ok_or(DialogueError::NoActiveConversation)?;

        let Stage::QuestNarration { quest, line } = &mut state.stage else {
            return Err(DialogueError::NotNarrating);
        };

        let npc = self.catalog.get(&state.npc_id);
        let speaker = npc.map_or(state.npc_id.as_str(), |n| n.display_name.as_str());

        let next = *line + 1;
        if let Some(text) = quest.dialogue.get(next) {
            *line = next;
            return Ok(vec![DialogueLine::say(speaker, text.clone())]);
        }

        let offer = offer_line(speaker, quest);
        let quest = quest.clone();
        state.stage = Stage::QuestOffer { quest };
        Ok(vec![offer])
    }

    /// Apply a menu or offer choice for the NPC currently talked to
    pub fn handle_dialogue_choice<P: QuestHolder + ?Sized>(
        &mut self,
        npc_id: &str,
        choice_index: usize,
        player: &mut P,
    ) -> Result<Vec<DialogueLine>, DialogueError> {
        let state = self.session.as_ref().ok_or(DialogueError::NoActiveConversation)?;
        if state.npc_id != npc_id {
            return Err(DialogueError::NpcMismatch {
                active: state.npc_id.clone(),
                requested: npc_id.to_string(),
            });
        }

        let catalog = Arc::clone(&self.catalog);
        let npc = catalog
            .get(npc_id)
            .ok_or_else(|| DialogueError::UnknownNpc(npc_id.to_string()))?;

        let menu_stage = match &state.stage {
            Stage::QuestOffer { .. } => None,
            Stage::QuestNarration { .. } => return Err(DialogueError::NotAwaitingChoice),
            Stage::Menu(stage) => Some(*stage),
        };
        let Some(menu_stage) = menu_stage else {
            return Ok(self.resolve_offer(npc, choice_index, player));
        };

        let outcome = self.handle_menu(npc, menu_stage, choice_index, player)?;
        let mut lines = outcome.lines;
        match outcome.next {
            Transition::Stay(stage) => {
                lines.push(self.menu_line(npc, stage, &*player));
                self.session = Some(DialogueState::new(npc_id, Stage::Menu(stage)));
            }
            Transition::Narrate(quest) => {
                lines.push(self.begin_narration(npc, quest));
            }
            Transition::End => {
                self.session = None;
                debug!("{} ended the conversation", npc_id);
            }
        }
        Ok(lines)
    }

    /// Raw UI input: an index, or `CONTINUE_INPUT` to advance or close
    pub fn handle_input<P: QuestHolder + ?Sized>(
        &mut self,
        npc_id: &str,
        input: i32,
        player: &mut P,
    ) -> Result<Vec<DialogueLine>, DialogueError> {
        if input != CONTINUE_INPUT {
            let index = usize::try_from(input).map_err(|_| DialogueError::InvalidInput(input))?;
            return self.handle_dialogue_choice(npc_id, index, player);
        }

        let state = self.session.as_ref().ok_or(DialogueError::NoActiveConversation)?;
        if state.npc_id != npc_id {
            return Err(DialogueError::NpcMismatch {
                active: state.npc_id.clone(),
                requested: npc_id.to_string(),
            });
        }

        if state.phase() == ConversationPhase::QuestNarration {
            return self.continue_dialogue();
        }
        self.end_dialogue();
        Ok(Vec::new())
    }

    /// Drop the open conversation, if any. Returns whether one was open.
    pub fn end_dialogue(&mut self) -> bool {
        match self.session.take() {
            Some(state) => {
                debug!("Conversation with {} closed", state.npc_id);
                true
            }
            None => false,
        }
    }

    fn begin_narration(&mut self, npc: &NpcDescriptor, quest: Quest) -> DialogueLine {
        let line = match quest.dialogue.first() {
            Some(text) => DialogueLine::say(&npc.display_name, text.clone()),
            None => offer_line(&npc.display_name, &quest),
        };
        let stage = if quest.dialogue.is_empty() {
            Stage::QuestOffer { quest }
        } else {
            Stage::QuestNarration { quest, line: 0 }
        };
        self.session = Some(DialogueState::new(&npc.id, stage));
        line
    }

    fn resolve_offer<P: QuestHolder + ?Sized>(
        &mut self,
        npc: &NpcDescriptor,
        choice_index: usize,
        player: &mut P,
    ) -> Vec<DialogueLine> {
        let Some(DialogueState {
            stage: Stage::QuestOffer { mut quest },
            ..
        }) = self.session.take()
        else {
            return Vec::new();
        };

        if choice_index == ACCEPT_CHOICE {
            info!("Quest {} accepted from {}", quest.id, npc.id);
            quest.accept();
            player.add_quest(quest);
            vec![DialogueLine::say(&npc.display_name, "Wonderful! Come find me when it's done.")]
        } else {
            debug!("Quest {} declined", quest.id);
            vec![DialogueLine::say(&npc.display_name, "Another time, then.")]
        }
    }
}

fn offer_line(speaker: &str, quest: &Quest) -> DialogueLine {
    DialogueLine::ask(
        speaker,
        format!(
            "{}: {}. Reward: {}.",
            quest.title,
            quest.objective.describe(),
            quest.rewards.summary()
        ),
        ["Accept", "Decline"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::NpcRole;
    use crate::player::{CatchRecord, Player};
    use crate::quest::{evaluator, Rarity, DEFAULT_POOL_CAPACITY};

    fn engine_with(catalog: NpcCatalog, seed: u64) -> ConversationOrchestrator {
        let catalog = Arc::new(catalog);
        let pools = QuestPoolManager::new(
            Arc::clone(&catalog),
            QuestLibrary::new(Some(seed)),
            DEFAULT_POOL_CAPACITY,
        );
        ConversationOrchestrator::new(catalog, pools, ShopRegistry::with_defaults(), FishPrices::default())
    }

    fn engine(seed: u64) -> ConversationOrchestrator {
        engine_with(NpcCatalog::with_defaults(), seed)
    }

    /// Step through the narration of the current quest up to its offer
    fn advance_to_offer(engine: &mut ConversationOrchestrator) -> Quest {
        let quest = engine.state().unwrap().quest().unwrap().clone();
        for i in 1..quest.dialogue.len() {
            let lines = engine.continue_dialogue().unwrap();
            assert_eq!(lines[0].text, quest.dialogue[i]);
            assert_eq!(engine.state().unwrap().line_index(), Some(i));
        }
        let offer = engine.continue_dialogue().unwrap();
        assert_eq!(offer[0].choices, vec!["Accept", "Decline"]);
        assert!(offer[0].text.contains(&quest.rewards.summary()));
        assert_eq!(engine.phase(), ConversationPhase::QuestOffer);
        quest
    }

    #[test]
    fn test_choice_and_continue_from_idle_are_rejected() {
        let mut engine = engine(1);
        let mut player = Player::new("Ana", 0);

        assert_eq!(
            engine.handle_dialogue_choice("old_tom", 0, &mut player),
            Err(DialogueError::NoActiveConversation)
        );
        assert_eq!(engine.continue_dialogue(), Err(DialogueError::NoActiveConversation));
        assert!(!engine.is_active());
        assert_eq!(engine.phase(), ConversationPhase::Idle);
        assert!(!engine.end_dialogue());
    }

    #[test]
    fn test_unknown_npc_never_starts() {
        let mut engine = engine(1);
        let mut player = Player::new("Ana", 0);
        assert_eq!(
            engine.start_dialogue("ghost", &mut player),
            Err(DialogueError::UnknownNpc("ghost".into()))
        );
        assert!(!engine.is_active());
    }

    #[test]
    fn test_second_conversation_is_rejected() {
        let mut engine = engine(2);
        let mut player = Player::new("Ana", 0);
        engine.start_dialogue("old_tom", &mut player).unwrap();

        assert_eq!(
            engine.interact_with_npc("marina", &mut player),
            Err(DialogueError::ConversationAlreadyActive { npc_id: "old_tom".into() })
        );
        assert_eq!(engine.state().unwrap().npc_id, "old_tom");
        assert!(!player.stats.talked_to_trader);
    }

    #[test]
    fn test_quest_giver_opens_with_narration() {
        let mut engine = engine(3);
        let mut player = Player::new("Ana", 0);

        let lines = engine.start_dialogue("elder_rowan", &mut player).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].has_choices());
        assert_eq!(engine.phase(), ConversationPhase::QuestNarration);
        assert_eq!(engine.state().unwrap().line_index(), Some(0));
        assert!(player.stats.talked_to_quest_giver);

        let quest = engine.state().unwrap().quest().unwrap().clone();
        assert_eq!(lines[0].text, quest.dialogue[0]);

        advance_to_offer(&mut engine);
        assert!(engine.state().unwrap().is_quest_offer());
        assert_eq!(engine.continue_dialogue(), Err(DialogueError::NotNarrating));
    }

    #[test]
    fn test_accepting_quest() {
        let mut engine = engine(4);
        let mut player = Player::new("Ana", 0);

        engine.start_dialogue("old_tom", &mut player).unwrap();
        let quest = advance_to_offer(&mut engine);

        let lines = engine.handle_dialogue_choice("old_tom", ACCEPT_CHOICE, &mut player).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(engine.phase(), ConversationPhase::Idle);

        assert_eq!(player.active_quests().len(), 1);
        assert_eq!(player.active_quests()[0].id, quest.id);
        assert!(player.active_quests()[0].is_active);

        let next = engine.pools_mut().get_available("old_tom", &player);
        assert_ne!(next.id, quest.id);
    }

    #[test]
    fn test_declining_quest() {
        let mut engine = engine(5);
        let mut player = Player::new("Ana", 0);

        engine.start_dialogue("old_tom", &mut player).unwrap();
        let quest = advance_to_offer(&mut engine);

        engine.handle_dialogue_choice("old_tom", 1, &mut player).unwrap();
        assert!(player.active_quests().is_empty());
        assert_eq!(engine.phase(), ConversationPhase::Idle);

        // Declined quests stay on offer.
        engine.start_dialogue("old_tom", &mut player).unwrap();
        assert_eq!(engine.state().unwrap().quest().unwrap().id, quest.id);
    }

    #[test]
    fn test_choice_during_narration_is_rejected() {
        let mut engine = engine(6);
        let mut player = Player::new("Ana", 0);
        engine.start_dialogue("elder_rowan", &mut player).unwrap();

        assert_eq!(
            engine.handle_dialogue_choice("elder_rowan", 0, &mut player),
            Err(DialogueError::NotAwaitingChoice)
        );
        assert_eq!(
            engine.handle_dialogue_choice("old_tom", 0, &mut player),
            Err(DialogueError::NpcMismatch {
                active: "elder_rowan".into(),
                requested: "old_tom".into()
            })
        );
        assert_eq!(engine.state().unwrap().line_index(), Some(0));
    }

    #[test]
    fn test_quest_npc_greets_once_pool_is_claimed() {
        let mut engine = engine(7);
        let mut player = Player::new("Ana", 0);

        for _ in 0..DEFAULT_POOL_CAPACITY {
            engine.start_dialogue("old_tom", &mut player).unwrap();
            advance_to_offer(&mut engine);
            engine.handle_dialogue_choice("old_tom", ACCEPT_CHOICE, &mut player).unwrap();
        }
        assert_eq!(player.active_quests().len(), DEFAULT_POOL_CAPACITY);

        let lines = engine.start_dialogue("old_tom", &mut player).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].choices.len(), 4);
        assert_eq!(engine.phase(), ConversationPhase::Menu);
    }

    #[test]
    fn test_advisor_menu_flow() {
        let mut catalog = NpcCatalog::with_defaults();
        let mut quiet = NpcDescriptor::new("quiet_tom", "Quiet Tom", NpcRole::Fisherman);
        quiet.offers_quests = false;
        catalog.insert(quiet);
        let mut engine = engine_with(catalog, 8);
        let mut player = Player::new("Ana", 0);

        let lines = engine.start_dialogue("quiet_tom", &mut player).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].has_choices());
        assert_eq!(lines[1].choices.len(), 4);

        // Tip loops back to the menu.
        let lines = engine.handle_dialogue_choice("quiet_tom", 0, &mut player).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].choices.len(), 4);

        let lines = engine.handle_dialogue_choice("quiet_tom", 2, &mut player).unwrap();
        assert!(lines[0].text.contains("haven't caught anything"));

        player.stats.record_attempt(Some(CatchRecord::new("bass", 47, Rarity::Common)));
        let lines = engine.handle_dialogue_choice("quiet_tom", 2, &mut player).unwrap();
        assert!(lines[0].text.contains("47"));

        let lines = engine.handle_dialogue_choice("quiet_tom", 1, &mut player).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(engine.phase(), ConversationPhase::QuestNarration);
        let offered = engine.state().unwrap().quest().unwrap().id.clone();
        assert_eq!(engine.pools_mut().get_available("quiet_tom", &player).id, offered);
    }

    #[test]
    fn test_invalid_choice_keeps_menu() {
        let mut engine = engine(9);
        let mut player = Player::new("Ana", 0);
        engine.start_dialogue("pip", &mut player).unwrap();

        assert_eq!(
            engine.handle_dialogue_choice("pip", 5, &mut player),
            Err(DialogueError::InvalidChoice { index: 5, available: 2 })
        );
        assert_eq!(engine.phase(), ConversationPhase::Menu);

        let lines = engine.handle_dialogue_choice("pip", 0, &mut player).unwrap();
        assert_eq!(lines.len(), 2);
        let lines = engine.handle_dialogue_choice("pip", 1, &mut player).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(!engine.is_active());
    }

    #[test]
    fn test_trader_buy_flow() {
        let mut engine = engine(10);
        let mut player = Player::new("Ana", 100);

        let lines = engine.start_dialogue("marina", &mut player).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].choices, vec!["Browse wares", "Sell fish", "Goodbye"]);
        assert!(player.stats.talked_to_trader);

        let lines = engine.handle_dialogue_choice("marina", 0, &mut player).unwrap();
        assert_eq!(lines[0].choices, vec!["Bait (5g)", "Shiny Lure (40g)", "Sturdy Rod (250g)", "Back"]);

        let lines = engine.handle_dialogue_choice("marina", 0, &mut player).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(player.money, 95);
        assert_eq!(player.item_count("bait"), 1);

        // Too expensive: nothing changes, still in the shop.
        engine.handle_dialogue_choice("marina", 2, &mut player).unwrap();
        assert_eq!(player.money, 95);
        assert_eq!(player.item_count("sturdy_rod"), 0);
        assert_eq!(engine.state().unwrap().menu_stage(), Some(MenuStage::Shop));

        let lines = engine.handle_dialogue_choice("marina", 3, &mut player).unwrap();
        assert_eq!(lines[0].choices.len(), 3);
        assert_eq!(engine.state().unwrap().menu_stage(), Some(MenuStage::Main));

        engine.handle_dialogue_choice("marina", 2, &mut player).unwrap();
        assert!(!engine.is_active());
    }

    #[test]
    fn test_trader_sell_flow() {
        let mut engine = engine(11);
        let mut player = Player::new("Ana", 0);
        player.stats.record_attempt(Some(CatchRecord::new("carp", 30, Rarity::Common)));
        player.stats.record_attempt(Some(CatchRecord::new("pike", 50, Rarity::Rare)));

        engine.start_dialogue("marina", &mut player).unwrap();
        let lines = engine.handle_dialogue_choice("marina", 1, &mut player).unwrap();
        assert!(lines[0].text.contains("115 gold"));
        assert_eq!(lines[0].choices, vec!["Sell all", "Back"]);

        engine.handle_dialogue_choice("marina", 0, &mut player).unwrap();
        assert_eq!(player.money, 115);
        assert!(player.stats.caught.is_empty());
        assert!(player.stats.has_sold_fish);
        assert_eq!(player.stats.rare_fish_caught, 1);
        assert_eq!(engine.state().unwrap().menu_stage(), Some(MenuStage::Main));

        // Nothing left to sell: only "Back".
        let lines = engine.handle_dialogue_choice("marina", 1, &mut player).unwrap();
        assert_eq!(lines[0].choices, vec!["Back"]);
    }

    #[test]
    fn test_handle_input_sentinel() {
        let mut engine = engine(12);
        let mut player = Player::new("Ana", 0);

        engine.start_dialogue("elder_rowan", &mut player).unwrap();
        engine.handle_input("elder_rowan", CONTINUE_INPUT, &mut player).unwrap();
        assert_eq!(engine.state().unwrap().line_index(), Some(1));

        engine.end_dialogue();
        engine.start_dialogue("pip", &mut player).unwrap();
        let lines = engine.handle_input("pip", CONTINUE_INPUT, &mut player).unwrap();
        assert!(lines.is_empty());
        assert!(!engine.is_active());
        assert_eq!(
            engine.handle_input("pip", CONTINUE_INPUT, &mut player),
            Err(DialogueError::NoActiveConversation)
        );
    }

    #[test]
    fn test_handle_input_rejects_other_negatives_and_wrong_npc() {
        let mut engine = engine(15);
        let mut player = Player::new("Ana", 0);
        engine.start_dialogue("pip", &mut player).unwrap();

        assert_eq!(
            engine.handle_input("pip", -2, &mut player),
            Err(DialogueError::InvalidInput(-2))
        );
        assert_eq!(
            engine.handle_input("marina", CONTINUE_INPUT, &mut player),
            Err(DialogueError::NpcMismatch {
                active: "pip".into(),
                requested: "marina".into()
            })
        );
        assert!(engine.is_active());
        assert_eq!(engine.phase(), ConversationPhase::Menu);

        engine.end_dialogue();
        engine.start_dialogue("elder_rowan", &mut player).unwrap();
        assert!(engine.handle_input("old_tom", CONTINUE_INPUT, &mut player).is_err());
        assert_eq!(engine.state().unwrap().line_index(), Some(0));
    }

    #[test]
    fn test_completed_quest_never_offered_again() {
        let mut engine = engine(13);
        let mut player = Player::new("Ana", 0);

        engine.start_dialogue("elder_rowan", &mut player).unwrap();
        let quest = advance_to_offer(&mut engine);
        engine.handle_dialogue_choice("elder_rowan", ACCEPT_CHOICE, &mut player).unwrap();

        let id = quest.id.clone();
        player.complete_quest(&id);
        for done in player.completed_quests() {
            assert!(done.is_completed && !done.is_active);
        }
        assert!(evaluator::satisfied_quests(player.active_quests(), &player.stats).is_empty());

        for _ in 0..5 {
            let offered = engine.pools_mut().get_available("elder_rowan", &player);
            assert_ne!(offered.id, id);
            player.add_quest(offered);
        }
    }

    #[test]
    fn test_from_config_falls_back_to_builtin_content() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = EngineConfig {
            data_dir: temp_dir.path().to_path_buf(),
            seed: Some(14),
            ..Default::default()
        };

        let mut engine = ConversationOrchestrator::from_config(&config).unwrap();
        assert_eq!(engine.catalog().len(), 4);
        assert_eq!(engine.pools().capacity(), DEFAULT_POOL_CAPACITY);

        let mut player = Player::new("Ana", 10);
        engine.start_dialogue("marina", &mut player).unwrap();
        let lines = engine.handle_dialogue_choice("marina", 0, &mut player).unwrap();
        assert_eq!(lines[0].choices.len(), 4);
    }
}

