use soroban_sdk::Env;

use crate::constants::{MAX_GOLD_PER_ACTION, MAX_XP_PER_ACTION};
use crate::errors::Error;
use crate::events;
use crate::rewards;
use crate::storage;
use crate::types::{DMAction, DMActionKind, Session, SessionState};

/// Dispatches a single DM action (spec §4.4). A closed sum type, matched
/// exhaustively; unknown tags cannot occur since `DMActionKind` is a
/// `#[contracttype]` enum, not an open string tag.
pub(crate) fn dispatch_action(env: &Env, session_id: u32, action: DMAction) -> Result<(), Error> {
    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::Active {
        return Ok(());
    }

    match action.kind {
        DMActionKind::Narrate => Ok(()),
        DMActionKind::RewardGold => reward_gold(env, session_id, &mut session, &action),
        DMActionKind::RewardXp => reward_xp(env, session_id, &action),
        DMActionKind::Damage => Ok(()),
        DMActionKind::KillPlayer => kill_player(env, session_id, &mut session, &action),
        DMActionKind::Complete => rewards::complete_session(env, session_id),
        DMActionKind::Fail => rewards::fail_session(env, session_id),
    }
}

fn reward_gold(env: &Env, session_id: u32, session: &mut Session, action: &DMAction) -> Result<(), Error> {
    let target = action.target.clone().ok_or(Error::PlayerNotAlive)?;
    if action.value > MAX_GOLD_PER_ACTION || action.value <= 0 {
        return Err(Error::GoldCapExceeded);
    }
    if session.gold_pool + action.value > session.max_gold {
        return Err(Error::GoldCapExceeded);
    }
    if !storage::is_player_alive(env, session_id, &target) {
        return Err(Error::PlayerNotAlive);
    }

    let current = storage::get_session_player_gold(env, session_id, &target);
    storage::set_session_player_gold(env, session_id, &target, current + action.value);
    session.gold_pool += action.value;
    storage::set_session(env, session_id, session);

    events::emit_gold_awarded(env, session_id, &target, action.value);
    Ok(())
}

fn reward_xp(env: &Env, session_id: u32, action: &DMAction) -> Result<(), Error> {
    let target = action.target.clone().ok_or(Error::PlayerNotAlive)?;
    if action.value > MAX_XP_PER_ACTION || action.value <= 0 {
        return Err(Error::XpCapExceeded);
    }
    if !storage::is_player_alive(env, session_id, &target) {
        return Err(Error::PlayerNotAlive);
    }

    storage::add_xp(env, &target, action.value);
    events::emit_xp_awarded(env, session_id, &target, action.value);
    Ok(())
}

fn kill_player(env: &Env, session_id: u32, session: &mut Session, action: &DMAction) -> Result<(), Error> {
    let target = action.target.clone().ok_or(Error::PlayerNotAlive)?;
    let dm = session.dm.clone().expect("kill dispatched only within an active session");
    if target == dm || !storage::is_player_alive(env, session_id, &target) {
        return Err(Error::PlayerNotAlive);
    }

    storage::set_player_alive(env, session_id, &target, false);

    let lost_gold = storage::get_session_player_gold(env, session_id, &target);
    if lost_gold > 0 {
        storage::set_session_player_gold(env, session_id, &target, 0);
        let mut dungeon = storage::get_dungeon(env, session.dungeon_id).expect("dungeon must exist");
        dungeon.loot_pool_gold += lost_gold;
        storage::set_dungeon(env, session.dungeon_id, &dungeon);
        events::emit_loot_pool_updated(env, session.dungeon_id, dungeon.loot_pool_native, dungeon.loot_pool_gold);
    }
    events::emit_player_died(env, session_id, &target, lost_gold);

    let mut all_dead = true;
    for p in session.party.iter() {
        if storage::is_player_alive(env, session_id, &p) {
            all_dead = false;
            break;
        }
    }

    if all_dead {
        rewards::fail_session(env, session_id)
    } else {
        storage::set_session(env, session_id, session);
        Ok(())
    }
}
