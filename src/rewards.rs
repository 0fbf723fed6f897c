use soroban_sdk::{Address, Env, String};

use crate::constants::ROYALTY_BPS;
use crate::errors::Error;
use crate::events;
use crate::minter::MinterClient;
use crate::session;
use crate::storage;
use crate::types::SessionState;
use crate::{epoch, escrow};

/// Distributes `gold_pool` on a successful finish: DM fee, dungeon-owner
/// royalty, and a pro-rata share to living party members (spec §4.5
/// Completion). Idempotent — a second call on an already-resolved session
/// is a silent no-op.
pub(crate) fn complete_session(env: &Env, session_id: u32) -> Result<(), Error> {
    let mut sess = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if sess.state != SessionState::Active && sess.state != SessionState::WaitingDM {
        return Ok(());
    }

    let epoch_info = epoch::get_epoch(env, sess.epoch_id).unwrap_or_else(|| epoch::get_current_epoch(env));
    let gold = sess.gold_pool;
    let dm_fee = gold * (epoch_info.dm_fee_pct as i128) / 100;
    let royalty = gold * ROYALTY_BPS / 10_000;
    let players_share = gold - dm_fee - royalty;

    let dm = sess.dm.clone().expect("completed session always has a dm");
    let dungeon = storage::get_dungeon(env, sess.dungeon_id).expect("dungeon must exist");
    let config = storage::get_config(env);

    if royalty > 0 {
        storage::add_pending_royalty(env, &dungeon.owner, royalty);
    }

    for p in sess.all_players.iter() {
        escrow::release(env, session_id, &p);
    }

    sess.state = SessionState::Completed;
    storage::set_session(env, session_id, &sess);
    session::finalize_dungeon_slot(env, sess.dungeon_id, session_id);
    storage::decrement_active_session_count(env);

    let minter = MinterClient::new(env, &config.minter);
    let mut total_minted: i128 = 0;

    if dm_fee > 0 {
        minter.mint(&dm, &dm_fee);
        storage::add_total_gold_earned(env, &dm, dm_fee);
        total_minted += dm_fee;
    }

    if players_share > 0 {
        let mut total_alloc: i128 = 0;
        for p in sess.party.iter() {
            total_alloc += storage::get_session_player_gold(env, session_id, &p);
        }
        if total_alloc > 0 {
            for p in sess.party.iter() {
                let share = storage::get_session_player_gold(env, session_id, &p);
                if share == 0 {
                    continue;
                }
                let payout = players_share * share / total_alloc;
                if payout > 0 {
                    minter.mint(&p, &payout);
                    storage::add_total_gold_earned(env, &p, payout);
                    total_minted += payout;
                }
            }
        }
    }

    let recap = String::from_str(
        env,
        if dm_fee > 0 { "dungeon completed: party triumphant, dm paid" } else { "dungeon completed: party triumphant" },
    );
    events::emit_dungeon_completed(env, session_id, total_minted, royalty, &recap);
    Ok(())
}

/// Sends every living party member's accrued gold and every still-held bond
/// to the dungeon's loot pools (spec §4.5 Failure). Idempotent.
pub(crate) fn fail_session(env: &Env, session_id: u32) -> Result<(), Error> {
    let mut sess = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if sess.state != SessionState::Active && sess.state != SessionState::WaitingDM {
        return Ok(());
    }

    let mut forfeited_gold: i128 = 0;
    for p in sess.party.iter() {
        let g = storage::get_session_player_gold(env, session_id, &p);
        if g > 0 {
            forfeited_gold += g;
            storage::set_session_player_gold(env, session_id, &p, 0);
        }
    }

    for p in sess.all_players.iter() {
        escrow::forfeit(env, session_id, &p, sess.dungeon_id);
    }

    if forfeited_gold > 0 {
        let mut dungeon = storage::get_dungeon(env, sess.dungeon_id).expect("dungeon must exist");
        dungeon.loot_pool_gold += forfeited_gold;
        storage::set_dungeon(env, sess.dungeon_id, &dungeon);
        events::emit_loot_pool_updated(env, sess.dungeon_id, dungeon.loot_pool_native, dungeon.loot_pool_gold);
    }

    sess.state = SessionState::Failed;
    storage::set_session(env, session_id, &sess);
    session::finalize_dungeon_slot(env, sess.dungeon_id, session_id);
    storage::decrement_active_session_count(env);

    let recap = String::from_str(
        env,
        if forfeited_gold > 0 { "dungeon failed: party wiped, gold forfeited" } else { "dungeon failed: party wiped" },
    );
    events::emit_dungeon_failed(env, session_id, forfeited_gold, &recap);
    Ok(())
}

/// Only the DM of an Active session may draw from their dungeon's
/// gold-denominated loot pool into a living party member's allocation.
pub fn award_from_loot_pool(env: &Env, session_id: u32, dm: Address, target: Address, amount: i128) -> Result<(), Error> {
    dm.require_auth();
    let mut sess = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if sess.state != SessionState::Active {
        return Err(Error::SessionNotActive);
    }
    if sess.dm.as_ref() != Some(&dm) {
        return Err(Error::NotDM);
    }
    if amount <= 0 || amount > crate::constants::MAX_GOLD_PER_ACTION {
        return Err(Error::GoldCapExceeded);
    }
    if sess.gold_pool + amount > sess.max_gold {
        return Err(Error::GoldCapExceeded);
    }
    if !sess.party.contains(&target) || !storage::is_player_alive(env, session_id, &target) {
        return Err(Error::PlayerNotAlive);
    }

    let mut dungeon = storage::get_dungeon(env, sess.dungeon_id).ok_or(Error::DungeonNotFound)?;
    if dungeon.loot_pool_gold < amount {
        return Err(Error::InsufficientBond);
    }
    dungeon.loot_pool_gold -= amount;
    storage::set_dungeon(env, sess.dungeon_id, &dungeon);

    let current = storage::get_session_player_gold(env, session_id, &target);
    storage::set_session_player_gold(env, session_id, &target, current + amount);
    sess.gold_pool += amount;
    storage::set_session(env, session_id, &sess);

    events::emit_gold_awarded(env, session_id, &target, amount);
    events::emit_loot_pool_updated(env, sess.dungeon_id, dungeon.loot_pool_native, dungeon.loot_pool_gold);
    Ok(())
}

/// Mints `caller`'s claimable royalty IOU and zeroes it.
pub fn claim_royalties(env: &Env, caller: Address) -> Result<i128, Error> {
    caller.require_auth();
    let amount = storage::get_pending_royalty(env, &caller);
    if amount == 0 {
        return Err(Error::NothingToWithdraw);
    }
    storage::set_pending_royalty(env, &caller, 0);

    let config = storage::get_config(env);
    let minter = MinterClient::new(env, &config.minter);
    minter.mint(&caller, &amount);

    events::emit_royalty_claimed(env, &caller, amount);
    Ok(amount)
}

/// Immediate payout used by `flee`: mints the fleeing player's accrued gold
/// minus the standard royalty, booking the royalty to the dungeon owner.
pub(crate) fn flee_payout(env: &Env, session_id: u32, agent: &Address, dungeon_owner: &Address, gold: i128) -> (i128, i128) {
    if gold == 0 {
        return (0, 0);
    }
    storage::set_session_player_gold(env, session_id, agent, 0);
    let royalty = gold * ROYALTY_BPS / 10_000;
    let kept = gold - royalty;

    let config = storage::get_config(env);
    let minter = MinterClient::new(env, &config.minter);
    if kept > 0 {
        minter.mint(agent, &kept);
        storage::add_total_gold_earned(env, agent, kept);
    }
    if royalty > 0 {
        storage::add_pending_royalty(env, dungeon_owner, royalty);
    }
    (kept, royalty)
}
