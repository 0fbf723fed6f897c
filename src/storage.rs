use soroban_sdk::{contracttype, Address, Env};

use crate::constants::{TTL_EXTEND_TO_LEDGERS, TTL_THRESHOLD_LEDGERS};
use crate::errors::Error;
use crate::types::{Config, Dungeon, EpochInfo, Session, Skill};

// ============================================================================
// Storage Keys
// ============================================================================
// Storage tiers:
// - Instance: Owner, Runner, Paused, Config, CurrentEpoch, id counters.
// - Persistent: Agent, Skill, SkillOrder, Dungeon, WithdrawableBond,
//   PendingRoyalty, Xp, TotalGoldEarned, Epoch (sessions may finish under a
//   long-since-rolled epoch's pinned dm_fee_pct, so epoch records must
//   outlive the epoch itself).
// - Temporary: Session and its side tables (bounded-lifetime gameplay data).

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    Runner,
    Paused,
    Config,
    CurrentEpoch,
    NextDungeonId,
    NextSessionId,
    NextSkillId,
    ActiveSessionCount,

    Agent(Address),
    Skill(u32),
    SkillOrder,
    Dungeon(u32),
    WithdrawableBond(Address),
    PendingRoyalty(Address),
    Xp(Address),
    TotalGoldEarned(Address),
    Epoch(u32),

    Session(u32),
    BondOf(u32, Address),
    SessionPlayerGold(u32, Address),
    SessionPlayerAlive(u32, Address),
    ActionSubmitted(u32, u32),
}

// ============================================================================
// Identity & access (instance)
// ============================================================================

pub(crate) fn get_owner(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Owner).expect("Owner not set")
}

pub(crate) fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub(crate) fn get_runner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Runner)
}

pub(crate) fn set_runner(env: &Env, runner: &Address) {
    env.storage().instance().set(&DataKey::Runner, runner);
}

pub(crate) fn require_owner(env: &Env) -> Result<(), Error> {
    let owner = get_owner(env);
    owner.require_auth();
    Ok(())
}

pub(crate) fn require_runner(env: &Env) -> Result<Address, Error> {
    let runner = get_runner(env).ok_or(Error::NotRunner)?;
    runner.require_auth();
    Ok(runner)
}

// ============================================================================
// Pause gate
// ============================================================================

pub(crate) fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

pub(crate) fn set_pause_state(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub(crate) fn require_not_paused(env: &Env) -> Result<(), Error> {
    if is_paused(env) {
        Err(Error::ContractPaused)
    } else {
        Ok(())
    }
}

// ============================================================================
// Config
// ============================================================================

pub(crate) fn get_config(env: &Env) -> Config {
    env.storage().instance().get(&DataKey::Config).expect("Config not set")
}

pub(crate) fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// Epoch (instance pointer + persistent history)
// ============================================================================

pub(crate) fn get_current_epoch_index(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::CurrentEpoch).unwrap_or(0)
}

pub(crate) fn set_current_epoch_index(env: &Env, index: u32) {
    env.storage().instance().set(&DataKey::CurrentEpoch, &index);
}

pub(crate) fn get_epoch(env: &Env, index: u32) -> Option<EpochInfo> {
    let key = DataKey::Epoch(index);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
    result
}

pub(crate) fn set_epoch(env: &Env, index: u32, info: &EpochInfo) {
    let key = DataKey::Epoch(index);
    env.storage().persistent().set(&key, info);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

// ============================================================================
// Agents (persistent)
// ============================================================================

pub(crate) fn is_agent_registered(env: &Env, agent: &Address) -> bool {
    env.storage().persistent().get(&DataKey::Agent(agent.clone())).unwrap_or(false)
}

pub(crate) fn set_agent_registered(env: &Env, agent: &Address, registered: bool) {
    let key = DataKey::Agent(agent.clone());
    env.storage().persistent().set(&key, &registered);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

// ============================================================================
// Skills (persistent)
// ============================================================================

pub(crate) fn next_skill_id(env: &Env) -> u32 {
    let id: u32 = env.storage().instance().get(&DataKey::NextSkillId).unwrap_or(0);
    env.storage().instance().set(&DataKey::NextSkillId, &(id + 1));
    id
}

pub(crate) fn get_skill(env: &Env, id: u32) -> Option<Skill> {
    let key = DataKey::Skill(id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
    result
}

pub(crate) fn set_skill(env: &Env, id: u32, skill: &Skill) {
    let key = DataKey::Skill(id);
    env.storage().persistent().set(&key, skill);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

pub(crate) fn remove_skill(env: &Env, id: u32) {
    env.storage().persistent().remove(&DataKey::Skill(id));
}

pub(crate) fn get_skill_order(env: &Env) -> soroban_sdk::Vec<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::SkillOrder)
        .unwrap_or_else(|| soroban_sdk::Vec::new(env))
}

pub(crate) fn set_skill_order(env: &Env, order: &soroban_sdk::Vec<u32>) {
    let key = DataKey::SkillOrder;
    env.storage().persistent().set(&key, order);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

// ============================================================================
// Dungeons (persistent)
// ============================================================================

pub(crate) fn next_dungeon_id(env: &Env) -> u32 {
    let id: u32 = env.storage().instance().get(&DataKey::NextDungeonId).unwrap_or(0);
    env.storage().instance().set(&DataKey::NextDungeonId, &(id + 1));
    id
}

pub(crate) fn get_dungeon(env: &Env, id: u32) -> Option<Dungeon> {
    let key = DataKey::Dungeon(id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
    result
}

pub(crate) fn set_dungeon(env: &Env, id: u32, dungeon: &Dungeon) {
    let key = DataKey::Dungeon(id);
    env.storage().persistent().set(&key, dungeon);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

// ============================================================================
// Sessions (temporary)
// ============================================================================

pub(crate) fn next_session_id(env: &Env) -> u32 {
    let id: u32 = env.storage().instance().get(&DataKey::NextSessionId).unwrap_or(0);
    env.storage().instance().set(&DataKey::NextSessionId, &(id + 1));
    id
}

pub(crate) fn get_session(env: &Env, id: u32) -> Option<Session> {
    let key = DataKey::Session(id);
    let result = env.storage().temporary().get(&key);
    if result.is_some() {
        env.storage().temporary().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
    result
}

pub(crate) fn set_session(env: &Env, id: u32, session: &Session) {
    let key = DataKey::Session(id);
    env.storage().temporary().set(&key, session);
    env.storage().temporary().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

pub(crate) fn get_bond(env: &Env, session_id: u32, participant: &Address) -> i128 {
    env.storage()
        .temporary()
        .get(&DataKey::BondOf(session_id, participant.clone()))
        .unwrap_or(0)
}

pub(crate) fn set_bond(env: &Env, session_id: u32, participant: &Address, amount: i128) {
    let key = DataKey::BondOf(session_id, participant.clone());
    if amount == 0 {
        env.storage().temporary().remove(&key);
    } else {
        env.storage().temporary().set(&key, &amount);
        env.storage().temporary().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
}

pub(crate) fn get_session_player_gold(env: &Env, session_id: u32, participant: &Address) -> i128 {
    env.storage()
        .temporary()
        .get(&DataKey::SessionPlayerGold(session_id, participant.clone()))
        .unwrap_or(0)
}

pub(crate) fn set_session_player_gold(env: &Env, session_id: u32, participant: &Address, amount: i128) {
    let key = DataKey::SessionPlayerGold(session_id, participant.clone());
    env.storage().temporary().set(&key, &amount);
    env.storage().temporary().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

pub(crate) fn is_player_alive(env: &Env, session_id: u32, participant: &Address) -> bool {
    env.storage()
        .temporary()
        .get(&DataKey::SessionPlayerAlive(session_id, participant.clone()))
        .unwrap_or(true)
}

pub(crate) fn set_player_alive(env: &Env, session_id: u32, participant: &Address, alive: bool) {
    let key = DataKey::SessionPlayerAlive(session_id, participant.clone());
    env.storage().temporary().set(&key, &alive);
    env.storage().temporary().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

pub(crate) fn is_action_submitted(env: &Env, session_id: u32, turn: u32) -> bool {
    env.storage()
        .temporary()
        .get(&DataKey::ActionSubmitted(session_id, turn))
        .unwrap_or(false)
}

pub(crate) fn set_action_submitted(env: &Env, session_id: u32, turn: u32, value: bool) {
    let key = DataKey::ActionSubmitted(session_id, turn);
    env.storage().temporary().set(&key, &value);
    env.storage().temporary().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

// ============================================================================
// Process-wide accounts (persistent: money owed must never silently expire)
// ============================================================================

pub(crate) fn get_withdrawable(env: &Env, participant: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::WithdrawableBond(participant.clone()))
        .unwrap_or(0)
}

pub(crate) fn set_withdrawable(env: &Env, participant: &Address, amount: i128) {
    let key = DataKey::WithdrawableBond(participant.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
}

pub(crate) fn add_withdrawable(env: &Env, participant: &Address, amount: i128) {
    let current = get_withdrawable(env, participant);
    set_withdrawable(env, participant, current + amount);
}

pub(crate) fn get_pending_royalty(env: &Env, owner: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::PendingRoyalty(owner.clone()))
        .unwrap_or(0)
}

pub(crate) fn set_pending_royalty(env: &Env, owner: &Address, amount: i128) {
    let key = DataKey::PendingRoyalty(owner.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
    }
}

pub(crate) fn add_pending_royalty(env: &Env, owner: &Address, amount: i128) {
    let current = get_pending_royalty(env, owner);
    set_pending_royalty(env, owner, current + amount);
}

pub(crate) fn get_xp(env: &Env, agent: &Address) -> i128 {
    env.storage().persistent().get(&DataKey::Xp(agent.clone())).unwrap_or(0)
}

pub(crate) fn add_xp(env: &Env, agent: &Address, amount: i128) {
    let key = DataKey::Xp(agent.clone());
    let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(current + amount));
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

pub(crate) fn get_total_gold_earned(env: &Env, agent: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalGoldEarned(agent.clone()))
        .unwrap_or(0)
}

pub(crate) fn add_total_gold_earned(env: &Env, agent: &Address, amount: i128) {
    let key = DataKey::TotalGoldEarned(agent.clone());
    let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(current + amount));
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}

pub(crate) fn get_active_session_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::ActiveSessionCount).unwrap_or(0)
}

pub(crate) fn set_active_session_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::ActiveSessionCount, &count);
}

pub(crate) fn increment_active_session_count(env: &Env) {
    set_active_session_count(env, get_active_session_count(env) + 1);
}

pub(crate) fn decrement_active_session_count(env: &Env) {
    let count = get_active_session_count(env);
    set_active_session_count(env, count.saturating_sub(1));
}

// ============================================================================
// Instance TTL
// ============================================================================

pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(TTL_THRESHOLD_LEDGERS, TTL_EXTEND_TO_LEDGERS);
}
