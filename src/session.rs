use soroban_sdk::{token, Address, Env, String, Vec};

use crate::constants::{
    BASE_GOLD_RATE, DM_ACCEPT_TIMEOUT, ENTRY_BOND, ENTRY_TICKET_KIND, MAX_ACTION_LENGTH,
    MAX_NARRATIVE_LENGTH, SESSION_TIMEOUT, TURN_TIMEOUT,
};
use crate::dispatch;
use crate::dungeon_asset::DungeonAssetRegistryClient;
use crate::epoch;
use crate::errors::Error;
use crate::escrow;
use crate::events;
use crate::identity;
use crate::rewards;
use crate::storage;
use crate::ticket_registry::TicketRegistryClient;
use crate::types::{DMAction, Session, SessionState};

/// Joins an existing `Waiting` session for `dungeon_id`, or creates a new
/// one, appending the caller to `all_players`. Fires DM selection once the
/// party is full (spec §4.3 Entry).
pub fn enter_dungeon(env: &Env, agent: Address, dungeon_id: u32, bond_amount: i128) -> Result<u32, Error> {
    agent.require_auth();
    storage::require_not_paused(env)?;
    identity::require_registered(env, &agent)?;
    let epoch_id = epoch::require_active(env)?;

    if bond_amount < ENTRY_BOND {
        return Err(Error::InsufficientBond);
    }

    let mut dungeon = storage::get_dungeon(env, dungeon_id).ok_or(Error::DungeonNotFound)?;
    if !dungeon.active {
        return Err(Error::DungeonNotActive);
    }

    let config = storage::get_config(env);
    let tickets = TicketRegistryClient::new(env, &config.ticket_registry);
    if tickets.balance_of(&agent, &ENTRY_TICKET_KIND) < 1 {
        return Err(Error::InsufficientTickets);
    }

    let session_id = match dungeon.current_session_id {
        Some(sid) => {
            let existing = storage::get_session(env, sid).expect("dungeon points at a live session");
            if existing.all_players.contains(&agent) {
                return Err(Error::AlreadyInParty);
            }
            if existing.state != SessionState::Waiting || existing.all_players.len() >= existing.party_size {
                return Err(Error::PartyFull);
            }
            sid
        }
        None => {
            let registry = DungeonAssetRegistryClient::new(env, &config.dungeon_asset_registry);
            let traits = registry.traits_of(&dungeon.external_asset_id);

            let id = storage::next_session_id(env);
            let max_gold = core::cmp::min(
                (traits.difficulty as i128) * BASE_GOLD_RATE,
                config.max_gold_per_session,
            );
            let session = Session {
                dungeon_id,
                dm: None,
                party: Vec::new(env),
                all_players: Vec::new(env),
                state: SessionState::Waiting,
                turn_number: 0,
                current_actor: None,
                turn_deadline: 0,
                gold_pool: 0,
                max_gold,
                acted_this_turn_bitmap: 0,
                dm_accept_deadline: 0,
                last_activity_ts: env.ledger().timestamp(),
                dm_epoch: 0,
                epoch_id,
                party_size: traits.party_size,
            };
            storage::set_session(env, id, &session);
            dungeon.current_session_id = Some(id);
            storage::set_dungeon(env, dungeon_id, &dungeon);
            storage::increment_active_session_count(env);
            id
        }
    };

    escrow::hold(env, session_id, &agent, ENTRY_BOND);

    let mut session = storage::get_session(env, session_id).expect("session created above");
    session.all_players.push_back(agent.clone());
    session.last_activity_ts = env.ledger().timestamp();
    storage::set_player_alive(env, session_id, &agent, true);

    let full = session.all_players.len() >= session.party_size;
    if full {
        select_dm(env, session_id, &mut session);
    }
    storage::set_session(env, session_id, &session);

    let native = token::Client::new(env, &config.native_token);
    native.transfer(&agent, &env.current_contract_address(), &ENTRY_BOND);
    tickets.consume(&agent, &ENTRY_TICKET_KIND, &1);

    events::emit_player_entered(env, session_id, dungeon_id, &agent);
    Ok(session_id)
}

/// Deterministic-seed selection (spec §4.3 DM selection). The PRNG is seeded
/// from ledger entropy — adversary-influenceable, accepted per spec because
/// every entrant's bond makes manipulation costly.
fn select_dm(env: &Env, session_id: u32, session: &mut Session) {
    let n = session.all_players.len();
    let idx = env.prng().gen_range::<u64>(0..n as u64) as u32;
    let dm = session.all_players.get(idx).expect("idx < n");

    let mut party = Vec::new(env);
    for (i, addr) in session.all_players.iter().enumerate() {
        if i as u32 != idx {
            party.push_back(addr);
        }
    }

    session.dm = Some(dm.clone());
    session.party = party;
    session.dm_epoch += 1;
    session.dm_accept_deadline = env.ledger().timestamp() + DM_ACCEPT_TIMEOUT;
    session.state = SessionState::WaitingDM;

    events::emit_dm_selected(env, session_id, &dm, session.dm_epoch);
}

/// Runner-relayed. Stale-epoch guarded: an accept racing with a reroll is
/// rejected because `dm_epoch` has already moved on.
pub fn accept_dm(env: &Env, session_id: u32, claimed_dm_epoch: u32, dm_address: Address) -> Result<(), Error> {
    storage::require_runner(env)?;
    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;

    if session.state != SessionState::WaitingDM {
        return Err(Error::SessionNotWaiting);
    }
    if session.dm.as_ref() != Some(&dm_address) || session.dm_epoch != claimed_dm_epoch {
        return Err(Error::StaleEpoch);
    }
    if env.ledger().timestamp() > session.dm_accept_deadline {
        return Err(Error::StaleEpoch);
    }

    session.state = SessionState::Active;
    session.turn_number = 1;
    session.current_actor = session.party.get(0);
    session.turn_deadline = env.ledger().timestamp() + TURN_TIMEOUT;
    session.last_activity_ts = env.ledger().timestamp();
    storage::set_session(env, session_id, &session);

    events::emit_dm_accepted(env, session_id, &dm_address);
    events::emit_game_started(env, session_id, session.dungeon_id, &dm_address);
    Ok(())
}

/// Permissionless, callable only after `dm_accept_deadline`. The delinquent
/// DM's bond is forfeited; if fewer than two players remain, the session is
/// cancelled instead of re-selecting.
pub fn reroll_dm(env: &Env, session_id: u32) -> Result<(), Error> {
    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::WaitingDM {
        return Err(Error::SessionNotWaiting);
    }
    if env.ledger().timestamp() <= session.dm_accept_deadline {
        return Err(Error::DeadlineNotPassed);
    }

    let old_dm = session.dm.clone().expect("WaitingDM always has a dm");
    escrow::forfeit(env, session_id, &old_dm, session.dungeon_id);

    let mut remaining = Vec::new(env);
    for p in session.all_players.iter() {
        if p != old_dm {
            remaining.push_back(p);
        }
    }
    session.all_players = remaining;

    if session.all_players.len() >= 2 {
        select_dm(env, session_id, &mut session);
        let new_dm = session.dm.clone().expect("select_dm always sets dm");
        storage::set_session(env, session_id, &session);
        events::emit_dm_rerolled(env, session_id, &old_dm, &new_dm);
    } else {
        session.state = SessionState::Cancelled;
        storage::set_session(env, session_id, &session);
        for p in session.all_players.iter() {
            escrow::release(env, session_id, &p);
        }
        finalize_dungeon_slot(env, session.dungeon_id, session_id);
        storage::decrement_active_session_count(env);
        events::emit_session_cancelled(env, session_id);
    }
    Ok(())
}

/// Runner-relayed. Preconditions per spec §4.3.
pub fn submit_action(env: &Env, session_id: u32, turn_index: u32, text: String, player: Address) -> Result<(), Error> {
    storage::require_runner(env)?;
    storage::require_not_paused(env)?;
    if text.len() > MAX_ACTION_LENGTH {
        return Err(Error::ActionTooLong);
    }

    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::Active {
        return Err(Error::SessionNotActive);
    }
    if session.current_actor.as_ref() != Some(&player) {
        return Err(Error::NotYourTurn);
    }
    if !storage::is_player_alive(env, session_id, &player) {
        return Err(Error::PlayerNotAlive);
    }
    if turn_index != session.turn_number {
        return Err(Error::WrongTurn);
    }

    storage::set_action_submitted(env, session_id, turn_index, true);
    let idx = session
        .all_players
        .iter()
        .position(|p| p == player)
        .expect("current_actor is always a member of all_players") as u32;
    session.acted_this_turn_bitmap |= 1 << idx;
    session.last_activity_ts = env.ledger().timestamp();

    advance_to_next_actor(env, session_id, &mut session);
    storage::set_session(env, session_id, &session);

    events::emit_action_submitted(env, session_id, &player, turn_index);
    Ok(())
}

/// Runner-relayed. Requires at least one player action this turn before the
/// DM may respond (`action_submitted` guard, spec §4.3).
pub fn submit_dm_response(
    env: &Env,
    session_id: u32,
    turn_index: u32,
    narrative: String,
    actions: Vec<DMAction>,
    dm: Address,
) -> Result<(), Error> {
    storage::require_runner(env)?;
    storage::require_not_paused(env)?;
    if narrative.len() > MAX_NARRATIVE_LENGTH {
        return Err(Error::NarrativeTooLong);
    }

    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::Active {
        return Err(Error::SessionNotActive);
    }
    if session.dm.as_ref() != Some(&dm) || session.current_actor.as_ref() != Some(&dm) {
        return Err(Error::NotYourTurn);
    }
    if turn_index != session.turn_number {
        return Err(Error::WrongTurn);
    }
    if !storage::is_action_submitted(env, session_id, turn_index) {
        return Err(Error::NoActionYet);
    }

    session.last_activity_ts = env.ledger().timestamp();
    storage::set_session(env, session_id, &session);
    events::emit_dm_response(env, session_id, turn_index, &narrative);

    for action in actions.iter() {
        dispatch::dispatch_action(env, session_id, action)?;
    }

    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state == SessionState::Active {
        session.turn_number += 1;
        session.acted_this_turn_bitmap = 0;
        advance_to_next_actor(env, session_id, &mut session);
        storage::set_session(env, session_id, &session);
    }
    Ok(())
}

/// Runner-relayed. `agent` forfeits the run but keeps their accrued gold
/// minus the standard royalty, and gets their bond back.
pub fn flee(env: &Env, session_id: u32, agent: Address) -> Result<(), Error> {
    storage::require_runner(env)?;
    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::Active {
        return Err(Error::SessionNotActive);
    }
    if !session.party.contains(&agent) || !storage::is_player_alive(env, session_id, &agent) {
        return Err(Error::PlayerNotAlive);
    }

    let dungeon = storage::get_dungeon(env, session.dungeon_id).ok_or(Error::DungeonNotFound)?;
    let gold = storage::get_session_player_gold(env, session_id, &agent);
    let (kept, royalty) = rewards::flee_payout(env, session_id, &agent, &dungeon.owner, gold);

    storage::set_player_alive(env, session_id, &agent, false);
    escrow::release(env, session_id, &agent);
    events::emit_player_fled(env, session_id, &agent, kept, royalty);

    let mut all_dead = true;
    for p in session.party.iter() {
        if storage::is_player_alive(env, session_id, &p) {
            all_dead = false;
            break;
        }
    }

    if all_dead {
        rewards::fail_session(env, session_id)?;
    } else {
        if session.current_actor.as_ref() == Some(&agent) {
            advance_to_next_actor(env, session_id, &mut session);
        }
        storage::set_session(env, session_id, &session);
    }
    Ok(())
}

/// Permissionless, reachable once `now > turn_deadline`. A delinquent DM
/// fails the session; a delinquent player is treated as having skipped.
pub fn timeout_advance(env: &Env, session_id: u32) -> Result<(), Error> {
    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::Active {
        return Err(Error::SessionNotActive);
    }
    if env.ledger().timestamp() <= session.turn_deadline {
        return Err(Error::DeadlineNotPassed);
    }

    let delinquent = session.current_actor.clone().expect("Active session always has a current actor");
    events::emit_turn_timeout(env, session_id, session.turn_number);

    if session.dm.as_ref() == Some(&delinquent) {
        rewards::fail_session(env, session_id)?;
    } else {
        let idx = session
            .all_players
            .iter()
            .position(|p| p == delinquent)
            .expect("current_actor is always a member of all_players") as u32;
        session.acted_this_turn_bitmap |= 1 << idx;
        session.last_activity_ts = env.ledger().timestamp();
        advance_to_next_actor(env, session_id, &mut session);
        storage::set_session(env, session_id, &session);
    }
    Ok(())
}

/// Permissionless. Reachable from `WaitingDM` or `Active` once idle for
/// `SESSION_TIMEOUT`. No forfeiture — nobody's fault.
pub fn timeout_session(env: &Env, session_id: u32) -> Result<(), Error> {
    let mut session = storage::get_session(env, session_id).ok_or(Error::SessionNotFound)?;
    if session.state != SessionState::WaitingDM && session.state != SessionState::Active {
        return Err(Error::SessionNotActive);
    }
    if env.ledger().timestamp() <= session.last_activity_ts + SESSION_TIMEOUT {
        return Err(Error::DeadlineNotPassed);
    }

    session.state = SessionState::TimedOut;
    storage::set_session(env, session_id, &session);

    for p in session.all_players.iter() {
        escrow::release(env, session_id, &p);
    }
    finalize_dungeon_slot(env, session.dungeon_id, session_id);
    storage::decrement_active_session_count(env);

    events::emit_session_timed_out(env, session_id);
    Ok(())
}

pub fn get_session(env: &Env, session_id: u32) -> Option<Session> {
    storage::get_session(env, session_id)
}

/// Clears a dungeon's live-session pointer once its session reaches a
/// terminal state, so the slot can host a new session.
pub(crate) fn finalize_dungeon_slot(env: &Env, dungeon_id: u32, session_id: u32) {
    if let Some(mut dungeon) = storage::get_dungeon(env, dungeon_id) {
        if dungeon.current_session_id == Some(session_id) {
            dungeon.current_session_id = None;
            storage::set_dungeon(env, dungeon_id, &dungeon);
        }
    }
}

fn find_next_in_party(env: &Env, session_id: u32, session: &Session, start: u32) -> Option<Address> {
    let n = session.party.len();
    if n == 0 {
        return None;
    }
    for offset in 0..n {
        let idx = (start + offset) % n;
        let candidate = session.party.get(idx).expect("idx < n");
        let ap_idx = session
            .all_players
            .iter()
            .position(|p| p == candidate)
            .expect("party member is always in all_players") as u32;
        let bit_clear = (session.acted_this_turn_bitmap >> ap_idx) & 1 == 0;
        if bit_clear && storage::is_player_alive(env, session_id, &candidate) {
            return Some(candidate);
        }
    }
    None
}

/// §4.3 turn scheduler. Decides the next actor from whoever just acted,
/// preferring living, not-yet-acted party members before handing the turn
/// back to the DM.
fn advance_to_next_actor(env: &Env, session_id: u32, session: &mut Session) {
    let dm = session.dm.clone().expect("advance requires dm to be set");
    let just_acted = session.current_actor.clone();
    let was_dm = just_acted.as_ref() == Some(&dm);

    let start: u32 = if was_dm {
        0
    } else {
        let actor = just_acted.expect("current_actor set while session Active");
        let party_idx = session.party.iter().position(|p| p == actor).unwrap_or(0) as u32;
        party_idx + 1
    };

    let next = find_next_in_party(env, session_id, session, start).unwrap_or_else(|| dm.clone());
    session.current_actor = Some(next.clone());
    session.turn_deadline = env.ledger().timestamp() + TURN_TIMEOUT;
    events::emit_turn_advanced(env, session_id, session.turn_number, &next);
}
