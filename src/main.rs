//! Scripted walk through the village: take a quest, fish, sell, and listen to
//! some chatter. Every dialogue line is printed as JSON.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use npc_quest_core::chatter::{ChatterRequest, ChatterWorker, OfflineChatter};
use npc_quest_core::dialogue::{ConversationPhase, ACCEPT_CHOICE};
use npc_quest_core::quest::Rarity;
use npc_quest_core::{CatchRecord, ConversationOrchestrator, DialogueLine, EngineConfig, Player, QuestHolder};

const SPECIES: [&str; 5] = ["perch", "carp", "trout", "pike", "salmon"];

fn print_lines(lines: &[DialogueLine]) -> Result<(), serde_json::Error> {
    for line in lines {
        println!("{}", serde_json::to_string(line)?);
    }
    Ok(())
}

/// Talk to an NPC and accept whatever quest they open with
fn take_quest(
    engine: &mut ConversationOrchestrator,
    npc_id: &str,
    player: &mut Player,
) -> Result<(), Box<dyn std::error::Error>> {
    print_lines(&engine.interact_with_npc(npc_id, player)?)?;
    while engine.phase() == ConversationPhase::QuestNarration {
        print_lines(&engine.continue_dialogue()?)?;
    }
    if engine.phase() == ConversationPhase::QuestOffer {
        print_lines(&engine.handle_dialogue_choice(npc_id, ACCEPT_CHOICE, player)?)?;
    } else {
        engine.end_dialogue();
    }
    Ok(())
}

fn go_fishing(player: &mut Player, casts: u32) {
    let mut rng = rand::thread_rng();
    for _ in 0..casts {
        let catch = rng.gen_bool(0.6).then(|| {
            let species = SPECIES.choose(&mut rng).copied().unwrap_or("perch");
            let rarity = *Rarity::ALL[..4].choose(&mut rng).unwrap_or(&Rarity::Common);
            CatchRecord::new(species, rng.gen_range(15..=75), rarity)
        });
        player.stats_mut().record_attempt(catch);

        for quest_id in player.check_quests() {
            info!("Quest {} done, purse now {} gold", quest_id, player.money);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("npc_quest_core=info".parse()?),
        )
        .init();

    let config = EngineConfig::load(Path::new("config.toml"))?;
    let mut engine = ConversationOrchestrator::from_config(&config)?;
    let mut player = Player::new("Ana", 50);

    let quest_givers: Vec<String> = engine
        .catalog()
        .ids()
        .filter(|id| engine.catalog().get(id).is_some_and(|npc| npc.offers_quests))
        .cloned()
        .collect();
    for npc_id in &quest_givers {
        take_quest(&mut engine, npc_id, &mut player)?;
    }
    info!("{} has {} active quests", player.name, player.active_quests().len());

    go_fishing(&mut player, 12);
    info!(
        "{} cast {} times, best fish {}cm",
        player.name, player.stats.fishing_attempts, player.stats.max_fish_length
    );

    // Sell everything to the first trader in town.
    let trader = engine
        .catalog()
        .ids()
        .find(|id| engine.catalog().role_of(id) == npc_quest_core::npc::NpcRole::Trader)
        .cloned();
    if let Some(trader) = trader {
        print_lines(&engine.interact_with_npc(&trader, &mut player)?)?;
        print_lines(&engine.handle_dialogue_choice(&trader, 1, &mut player)?)?;
        if !player.stats.caught.is_empty() {
            print_lines(&engine.handle_dialogue_choice(&trader, 0, &mut player)?)?;
        }
        engine.end_dialogue();
        player.check_quests();
        // Night falls and the shelves refill.
        engine.shops_mut().restock_all();
    }

    let mut chatter = ChatterWorker::spawn(
        Arc::new(OfflineChatter),
        Duration::from_millis(config.chatter_timeout_ms),
    );
    for npc_id in engine.catalog().ids() {
        if let Some(npc) = engine.catalog().get(npc_id) {
            chatter.request(ChatterRequest::for_npc(npc, "the player walks by"))?;
        }
    }
    for _ in 0..50 {
        if let Some(reply) = chatter.poll() {
            print_lines(&[reply.line])?;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    chatter.shutdown();

    info!(
        "{} finishes with {} gold, {} completed quests",
        player.name,
        player.money,
        player.completed_quests().len()
    );
    Ok(())
}
