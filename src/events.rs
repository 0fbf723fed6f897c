use soroban_sdk::{contractevent, Address, BytesN, Env, String};

// ============================================================================
// Identity & admin events
// ============================================================================

#[contractevent]
pub struct AgentRegistered {
    #[topic]
    pub agent: Address,
}

#[contractevent]
pub struct AgentUnregistered {
    #[topic]
    pub agent: Address,
}

#[contractevent]
pub struct RunnerUpdated {
    pub runner: Address,
}

#[contractevent]
pub struct MaxGoldPerSessionUpdated {
    pub max_gold_per_session: i128,
}

#[contractevent]
pub struct Paused {
    pub by: Address,
}

#[contractevent]
pub struct Unpaused {
    pub by: Address,
}

// ============================================================================
// Epoch events
// ============================================================================

#[contractevent]
pub struct EpochEnded {
    #[topic]
    pub index: u32,
    pub grace_start_ts: u64,
}

#[contractevent]
pub struct EpochStarted {
    #[topic]
    pub index: u32,
    pub skill_hash: BytesN<32>,
    pub dm_fee_pct: u32,
}

// ============================================================================
// Skill events
// ============================================================================

#[contractevent]
pub struct SkillAdded {
    #[topic]
    pub skill_id: u32,
    pub name: String,
}

#[contractevent]
pub struct SkillUpdated {
    #[topic]
    pub skill_id: u32,
}

#[contractevent]
pub struct SkillRemoved {
    #[topic]
    pub skill_id: u32,
}

// ============================================================================
// Dungeon events
// ============================================================================

#[contractevent]
pub struct DungeonActivated {
    #[topic]
    pub dungeon_id: u32,
    pub owner: Address,
    pub external_asset_id: u64,
}

#[contractevent]
pub struct DungeonDeactivated {
    #[topic]
    pub dungeon_id: u32,
    pub owner: Address,
}

#[contractevent]
pub struct LootPoolUpdated {
    #[topic]
    pub dungeon_id: u32,
    pub new_native_total: i128,
    pub new_gold_total: i128,
}

// ============================================================================
// Session lifecycle events
// ============================================================================

#[contractevent]
pub struct PlayerEntered {
    #[topic]
    pub session_id: u32,
    #[topic]
    pub dungeon_id: u32,
    pub player: Address,
}

#[contractevent]
pub struct DmSelected {
    #[topic]
    pub session_id: u32,
    pub dm: Address,
    pub dm_epoch: u32,
}

#[contractevent]
pub struct DmAccepted {
    #[topic]
    pub session_id: u32,
    pub dm: Address,
}

#[contractevent]
pub struct DmRerolled {
    #[topic]
    pub session_id: u32,
    pub old_dm: Address,
    pub new_dm: Address,
}

#[contractevent]
pub struct GameStarted {
    #[topic]
    pub session_id: u32,
    pub dungeon_id: u32,
    pub dm: Address,
}

#[contractevent]
pub struct ActionSubmitted {
    #[topic]
    pub session_id: u32,
    pub agent: Address,
    pub turn: u32,
}

#[contractevent]
pub struct DMResponse {
    #[topic]
    pub session_id: u32,
    pub turn: u32,
    pub narrative: String,
}

#[contractevent]
pub struct TurnAdvanced {
    #[topic]
    pub session_id: u32,
    pub turn: u32,
    pub next_actor: Address,
}

#[contractevent]
pub struct GoldAwarded {
    #[topic]
    pub session_id: u32,
    pub target: Address,
    pub amount: i128,
}

#[contractevent]
pub struct XPAwarded {
    #[topic]
    pub session_id: u32,
    pub target: Address,
    pub amount: i128,
}

#[contractevent]
pub struct PlayerDied {
    #[topic]
    pub session_id: u32,
    pub agent: Address,
    pub gold_forfeit: i128,
}

#[contractevent]
pub struct PlayerFled {
    #[topic]
    pub session_id: u32,
    pub agent: Address,
    pub gold_kept: i128,
    pub royalty: i128,
}

#[contractevent]
pub struct DungeonCompleted {
    #[topic]
    pub session_id: u32,
    pub total_minted: i128,
    pub royalty: i128,
    pub recap: String,
}

#[contractevent]
pub struct DungeonFailed {
    #[topic]
    pub session_id: u32,
    pub gold_forfeit: i128,
    pub recap: String,
}

#[contractevent]
pub struct TurnTimeout {
    #[topic]
    pub session_id: u32,
    pub turn: u32,
}

#[contractevent]
pub struct SessionTimedOut {
    #[topic]
    pub session_id: u32,
}

#[contractevent]
pub struct SessionCancelled {
    #[topic]
    pub session_id: u32,
}

// ============================================================================
// Bond / reward events
// ============================================================================

#[contractevent]
pub struct BondForfeited {
    #[topic]
    pub session_id: u32,
    pub participant: Address,
    pub amount: i128,
}

#[contractevent]
pub struct BondWithdrawn {
    #[topic]
    pub participant: Address,
    pub amount: i128,
}

#[contractevent]
pub struct RoyaltyClaimed {
    #[topic]
    pub owner: Address,
    pub amount: i128,
}

// ============================================================================
// Emission helper functions
// ============================================================================

pub(crate) fn emit_agent_registered(env: &Env, agent: &Address) {
    AgentRegistered { agent: agent.clone() }.publish(env);
}

pub(crate) fn emit_agent_unregistered(env: &Env, agent: &Address) {
    AgentUnregistered { agent: agent.clone() }.publish(env);
}

pub(crate) fn emit_runner_updated(env: &Env, runner: &Address) {
    RunnerUpdated { runner: runner.clone() }.publish(env);
}

pub(crate) fn emit_max_gold_per_session_updated(env: &Env, max_gold_per_session: i128) {
    MaxGoldPerSessionUpdated { max_gold_per_session }.publish(env);
}

pub(crate) fn emit_paused(env: &Env, by: &Address) {
    Paused { by: by.clone() }.publish(env);
}

pub(crate) fn emit_unpaused(env: &Env, by: &Address) {
    Unpaused { by: by.clone() }.publish(env);
}

pub(crate) fn emit_epoch_ended(env: &Env, index: u32, grace_start_ts: u64) {
    EpochEnded { index, grace_start_ts }.publish(env);
}

pub(crate) fn emit_epoch_started(env: &Env, index: u32, skill_hash: &BytesN<32>, dm_fee_pct: u32) {
    EpochStarted { index, skill_hash: skill_hash.clone(), dm_fee_pct }.publish(env);
}

pub(crate) fn emit_skill_added(env: &Env, skill_id: u32, name: &String) {
    SkillAdded { skill_id, name: name.clone() }.publish(env);
}

pub(crate) fn emit_skill_updated(env: &Env, skill_id: u32) {
    SkillUpdated { skill_id }.publish(env);
}

pub(crate) fn emit_skill_removed(env: &Env, skill_id: u32) {
    SkillRemoved { skill_id }.publish(env);
}

pub(crate) fn emit_dungeon_activated(env: &Env, dungeon_id: u32, owner: &Address, external_asset_id: u64) {
    DungeonActivated { dungeon_id, owner: owner.clone(), external_asset_id }.publish(env);
}

pub(crate) fn emit_dungeon_deactivated(env: &Env, dungeon_id: u32, owner: &Address) {
    DungeonDeactivated { dungeon_id, owner: owner.clone() }.publish(env);
}

pub(crate) fn emit_loot_pool_updated(env: &Env, dungeon_id: u32, new_native_total: i128, new_gold_total: i128) {
    LootPoolUpdated { dungeon_id, new_native_total, new_gold_total }.publish(env);
}

pub(crate) fn emit_player_entered(env: &Env, session_id: u32, dungeon_id: u32, player: &Address) {
    PlayerEntered { session_id, dungeon_id, player: player.clone() }.publish(env);
}

pub(crate) fn emit_dm_selected(env: &Env, session_id: u32, dm: &Address, dm_epoch: u32) {
    DmSelected { session_id, dm: dm.clone(), dm_epoch }.publish(env);
}

pub(crate) fn emit_dm_accepted(env: &Env, session_id: u32, dm: &Address) {
    DmAccepted { session_id, dm: dm.clone() }.publish(env);
}

pub(crate) fn emit_dm_rerolled(env: &Env, session_id: u32, old_dm: &Address, new_dm: &Address) {
    DmRerolled { session_id, old_dm: old_dm.clone(), new_dm: new_dm.clone() }.publish(env);
}

pub(crate) fn emit_game_started(env: &Env, session_id: u32, dungeon_id: u32, dm: &Address) {
    GameStarted { session_id, dungeon_id, dm: dm.clone() }.publish(env);
}

pub(crate) fn emit_action_submitted(env: &Env, session_id: u32, agent: &Address, turn: u32) {
    ActionSubmitted { session_id, agent: agent.clone(), turn }.publish(env);
}

pub(crate) fn emit_dm_response(env: &Env, session_id: u32, turn: u32, narrative: &String) {
    DMResponse { session_id, turn, narrative: narrative.clone() }.publish(env);
}

pub(crate) fn emit_turn_advanced(env: &Env, session_id: u32, turn: u32, next_actor: &Address) {
    TurnAdvanced { session_id, turn, next_actor: next_actor.clone() }.publish(env);
}

pub(crate) fn emit_gold_awarded(env: &Env, session_id: u32, target: &Address, amount: i128) {
    GoldAwarded { session_id, target: target.clone(), amount }.publish(env);
}

pub(crate) fn emit_xp_awarded(env: &Env, session_id: u32, target: &Address, amount: i128) {
    XPAwarded { session_id, target: target.clone(), amount }.publish(env);
}

pub(crate) fn emit_player_died(env: &Env, session_id: u32, agent: &Address, gold_forfeit: i128) {
    PlayerDied { session_id, agent: agent.clone(), gold_forfeit }.publish(env);
}

pub(crate) fn emit_player_fled(env: &Env, session_id: u32, agent: &Address, gold_kept: i128, royalty: i128) {
    PlayerFled { session_id, agent: agent.clone(), gold_kept, royalty }.publish(env);
}

pub(crate) fn emit_dungeon_completed(env: &Env, session_id: u32, total_minted: i128, royalty: i128, recap: &String) {
    DungeonCompleted { session_id, total_minted, royalty, recap: recap.clone() }.publish(env);
}

pub(crate) fn emit_dungeon_failed(env: &Env, session_id: u32, gold_forfeit: i128, recap: &String) {
    DungeonFailed { session_id, gold_forfeit, recap: recap.clone() }.publish(env);
}

pub(crate) fn emit_turn_timeout(env: &Env, session_id: u32, turn: u32) {
    TurnTimeout { session_id, turn }.publish(env);
}

pub(crate) fn emit_session_timed_out(env: &Env, session_id: u32) {
    SessionTimedOut { session_id }.publish(env);
}

pub(crate) fn emit_session_cancelled(env: &Env, session_id: u32) {
    SessionCancelled { session_id }.publish(env);
}

pub(crate) fn emit_bond_forfeited(env: &Env, session_id: u32, participant: &Address, amount: i128) {
    BondForfeited { session_id, participant: participant.clone(), amount }.publish(env);
}

pub(crate) fn emit_bond_withdrawn(env: &Env, participant: &Address, amount: i128) {
    BondWithdrawn { participant: participant.clone(), amount }.publish(env);
}

pub(crate) fn emit_royalty_claimed(env: &Env, owner: &Address, amount: i128) {
    RoyaltyClaimed { owner: owner.clone(), amount }.publish(env);
}
