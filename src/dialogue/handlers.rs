//! Role-specific menu handlers.
//!
//! Traders run a nested buy/sell menu, fishermen and quest givers share the
//! tip/quest/brag menu, and everyone else just chats.

use std::iter;

use rand::seq::SliceRandom;
use tracing::info;

use super::error::DialogueError;
use super::line::{DialogueLine, MenuStage};
use super::orchestrator::ConversationOrchestrator;
use crate::npc::{NpcDescriptor, NpcRole};
use crate::player::QuestHolder;
use crate::quest::Quest;
use crate::shop::ShopDefinition;

const TRADER_MENU: [&str; 3] = ["Browse wares", "Sell fish", "Goodbye"];
const ADVISOR_MENU: [&str; 4] = ["Any fishing tips?", "Got any work for me?", "Look at my catch!", "Goodbye"];
const GENERIC_MENU: [&str; 2] = ["Chat", "Goodbye"];

/// Where a handled menu choice leaves the conversation
#[derive(Debug)]
pub(super) enum Transition {
    /// Show this menu stage again after the lines
    Stay(MenuStage),
    /// Start narrating a quest
    Narrate(Quest),
    End,
}

#[derive(Debug)]
pub(super) struct MenuOutcome {
    pub lines: Vec<DialogueLine>,
    pub next: Transition,
}

impl MenuOutcome {
    fn stay(lines: Vec<DialogueLine>, stage: MenuStage) -> Self {
        Self {
            lines,
            next: Transition::Stay(stage),
        }
    }

    fn end(line: DialogueLine) -> Self {
        Self {
            lines: vec![line],
            next: Transition::End,
        }
    }
}

fn pick_line(pool: &[String], fallback: &str) -> String {
    pool.choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn check_choice(index: usize, available: usize) -> Result<(), DialogueError> {
    if index < available {
        Ok(())
    } else {
        Err(DialogueError::InvalidChoice { index, available })
    }
}

impl ConversationOrchestrator {
    /// The prompt and choices for an NPC's menu at the given stage
    pub(super) fn menu_line<P: QuestHolder + ?Sized>(
        &self,
        npc: &NpcDescriptor,
        stage: MenuStage,
        player: &P,
    ) -> DialogueLine {
        let name = npc.display_name.as_str();
        match (npc.role, stage) {
            (NpcRole::Trader, MenuStage::Shop) => match self.shop_for(npc) {
                Some(shop) => DialogueLine::ask(
                    name,
                    format!("Welcome to {}. Take a look.", shop.display_name),
                    shop.stock
                        .iter()
                        .map(|item| item.menu_label())
                        .chain(iter::once("Back".to_string())),
                ),
                None => DialogueLine::ask(name, "I've nothing for sale today.", ["Back"]),
            },
            (NpcRole::Trader, MenuStage::Sell) => {
                let fish = &player.stats().caught;
                if fish.is_empty() {
                    DialogueLine::ask(name, "You haven't got any fish to sell.", ["Back"])
                } else {
                    let total = self.fish_prices.total(fish);
                    DialogueLine::ask(
                        name,
                        format!("I'll give you {} gold for your {} fish.", total, fish.len()),
                        ["Sell all", "Back"],
                    )
                }
            }
            (NpcRole::Trader, MenuStage::Main) => DialogueLine::ask(name, "What'll it be?", TRADER_MENU),
            (NpcRole::Fisherman | NpcRole::QuestGiver, _) => {
                DialogueLine::ask(name, "What's on your mind?", ADVISOR_MENU)
            }
            (NpcRole::Generic, _) => DialogueLine::ask(name, "Need something?", GENERIC_MENU),
        }
    }

    pub(super) fn handle_menu<P: QuestHolder + ?Sized>(
        &mut self,
        npc: &NpcDescriptor,
        stage: MenuStage,
        choice: usize,
        player: &mut P,
    ) -> Result<MenuOutcome, DialogueError> {
        match npc.role {
            NpcRole::Trader => self.handle_trader(npc, stage, choice, player),
            NpcRole::Fisherman | NpcRole::QuestGiver => self.handle_advisor(npc, choice, player),
            NpcRole::Generic => handle_generic(npc, choice),
        }
    }

    fn shop_for(&self, npc: &NpcDescriptor) -> Option<&ShopDefinition> {
        npc.shop_id.as_deref().and_then(|id| self.shops.get(id))
    }

    fn handle_trader<P: QuestHolder + ?Sized>(
        &mut self,
        npc: &NpcDescriptor,
        stage: MenuStage,
        choice: usize,
        player: &mut P,
    ) -> Result<MenuOutcome, DialogueError> {
        let name = npc.display_name.as_str();
        match stage {
            MenuStage::Main => {
                check_choice(choice, TRADER_MENU.len())?;
                Ok(match choice {
                    0 => MenuOutcome::stay(Vec::new(), MenuStage::Shop),
                    1 => MenuOutcome::stay(Vec::new(), MenuStage::Sell),
                    _ => MenuOutcome::end(DialogueLine::say(name, pick_line(&npc.dialogue.farewells, "Bye now."))),
                })
            }
            MenuStage::Shop => {
                let stock_len = self.shop_for(npc).map_or(0, |shop| shop.stock.len());
                check_choice(choice, stock_len + 1)?;
                if choice == stock_len {
                    return Ok(MenuOutcome::stay(Vec::new(), MenuStage::Main));
                }

                let Some(shop) = npc.shop_id.as_deref().and_then(|id| self.shops.get_mut(id)) else {
                    return Ok(MenuOutcome::stay(Vec::new(), MenuStage::Main));
                };
                let item = &mut shop.stock[choice];

                let text = if !item.in_stock() {
                    format!("Sorry, I'm all out of {}.", item.name())
                } else if !player.spend_money(item.price) {
                    format!("That's {} gold. Come back when you've got it.", item.price)
                } else {
                    item.current_quantity -= 1;
                    player.add_item(&item.item_id, 1);
                    info!("Sold {} for {} gold at {}", item.item_id, item.price, shop.id);
                    format!("One {}, there you go.", item.name())
                };
                Ok(MenuOutcome::stay(vec![DialogueLine::say(name, text)], MenuStage::Shop))
            }
            MenuStage::Sell => {
                let has_fish = !player.stats().caught.is_empty();
                check_choice(choice, if has_fish { 2 } else { 1 })?;
                if !has_fish || choice == 1 {
                    return Ok(MenuOutcome::stay(Vec::new(), MenuStage::Main));
                }

                let fish = std::mem::take(&mut player.stats_mut().caught);
                let total = self.fish_prices.total(&fish);
                player.add_money(total);
                player.stats_mut().has_sold_fish = true;
                info!("Bought {} fish from the player for {} gold", fish.len(), total);

                let line = DialogueLine::say(name, format!("{} fish for {} gold. Pleasure doing business!", fish.len(), total));
                Ok(MenuOutcome::stay(vec![line], MenuStage::Main))
            }
        }
    }

    fn handle_advisor<P: QuestHolder + ?Sized>(
        &mut self,
        npc: &NpcDescriptor,
        choice: usize,
        player: &mut P,
    ) -> Result<MenuOutcome, DialogueError> {
        check_choice(choice, ADVISOR_MENU.len())?;
        let name = npc.display_name.as_str();

        Ok(match choice {
            0 => {
                let tip = pick_line(&npc.dialogue.tips, "Keep your line wet.");
                MenuOutcome::stay(vec![DialogueLine::say(name, tip)], MenuStage::Main)
            }
            1 => MenuOutcome {
                lines: Vec::new(),
                next: Transition::Narrate(self.pools.get_available(&npc.id, &*player)),
            },
            2 => {
                let best = player.stats().max_fish_length;
                let text = if best == 0 {
                    "Your catch? You haven't caught anything yet!".to_string()
                } else {
                    pick_line(&npc.dialogue.brags, "{length}cm. Nice.").replace("{length}", &best.to_string())
                };
                MenuOutcome::stay(vec![DialogueLine::say(name, text)], MenuStage::Main)
            }
            _ => MenuOutcome::end(DialogueLine::say(name, pick_line(&npc.dialogue.farewells, "Take care."))),
        })
    }
}

fn handle_generic(npc: &NpcDescriptor, choice: usize) -> Result<MenuOutcome, DialogueError> {
    check_choice(choice, GENERIC_MENU.len())?;
    let name = npc.display_name.as_str();
    Ok(match choice {
        0 => {
            let line = DialogueLine::say(name, pick_line(&npc.dialogue.chatter, "Nice day."));
            MenuOutcome::stay(vec![line], MenuStage::Main)
        }
        _ => MenuOutcome::end(DialogueLine::say(name, pick_line(&npc.dialogue.farewells, "Bye."))),
    })
}
