#![no_std]

//! # dungeon-core
//!
//! The game-engine core of an on-chain, turn-based multi-agent dungeon game.
//! Holds entry bonds, coordinates sessions of 2-6 players plus one
//! randomly-selected Dungeon Master, enforces turn order and per-session
//! resource caps, and distributes rewards on completion.
//!
//! ## Architecture
//! - Agents register, stake dungeons during Grace, and enter them with a
//!   bond + ticket during Active epochs.
//! - A session assembles a party, selects a DM, and runs a turn loop of
//!   runner-relayed player actions and DM responses.
//! - Completion mints reward tokens (DM fee, dungeon-owner royalty, pro-rata
//!   player shares); failure forfeits bonds and gold to the dungeon's loot
//!   pools.
//!
//! ## External Dependencies
//! - `Minter`: fungible reward-token ledger (mint/burn capability).
//! - `DungeonAssetRegistry`: non-fungible dungeon-identity ledger.
//! - `TicketRegistry`: consumable-ticket ledger.

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, Vec};

mod constants;
mod errors;
mod events;
mod storage;
mod types;

mod dispatch;
mod dungeon;
mod epoch;
mod escrow;
mod identity;
mod rewards;
mod session;
mod skills;
mod views;

mod dungeon_asset;
mod minter;
mod ticket_registry;

use errors::Error;
use types::{Config, Dungeon, DMAction, EpochInfo, Session, Skill};

#[contract]
pub struct DungeonCore;

#[contractimpl]
impl DungeonCore {
    // ========================================================================
    // Initialization
    // ========================================================================

    pub fn __constructor(
        env: Env,
        owner: Address,
        minter: Address,
        dungeon_asset_registry: Address,
        ticket_registry: Address,
        native_token: Address,
        max_gold_per_session: i128,
    ) {
        let config = Config {
            minter,
            dungeon_asset_registry,
            ticket_registry,
            native_token,
            max_gold_per_session,
        };
        storage::set_config(&env, &config);
        storage::set_owner(&env, &owner);
        storage::set_pause_state(&env, false);
        storage::extend_instance_ttl(&env);
        // The engine starts in Grace (epoch 0) so the owner can stake
        // dungeons and upload skills before the first Active epoch.
    }

    // ========================================================================
    // Identity & access
    // ========================================================================

    pub fn register_agent(env: Env, agent: Address) -> Result<(), Error> {
        identity::register_agent(&env, agent)
    }

    pub fn unregister_agent(env: Env, agent: Address) -> Result<(), Error> {
        identity::unregister_agent(&env, agent)
    }

    pub fn is_registered(env: Env, agent: Address) -> bool {
        identity::is_registered(&env, agent)
    }

    pub fn set_runner(env: Env, runner: Address) -> Result<(), Error> {
        identity::set_runner(&env, runner)
    }

    pub fn get_runner(env: Env) -> Option<Address> {
        identity::get_runner(&env)
    }

    // ========================================================================
    // Admin: config, pause
    // ========================================================================

    pub fn get_owner(env: Env) -> Address {
        storage::get_owner(&env)
    }

    pub fn set_owner(env: Env, new_owner: Address) -> Result<(), Error> {
        storage::require_owner(&env)?;
        storage::set_owner(&env, &new_owner);
        Ok(())
    }

    pub fn get_config(env: Env) -> Config {
        storage::get_config(&env)
    }

    pub fn set_max_gold_per_session(env: Env, max_gold_per_session: i128) -> Result<(), Error> {
        storage::require_owner(&env)?;
        let mut config = storage::get_config(&env);
        config.max_gold_per_session = max_gold_per_session;
        storage::set_config(&env, &config);
        events::emit_max_gold_per_session_updated(&env, max_gold_per_session);
        Ok(())
    }

    /// Pauses `enter_dungeon`, `stake_dungeon`, `submit_action`, and
    /// `submit_dm_response`. Withdrawals and timeout-sweeping remain
    /// available to protect held funds (spec §4.7).
    pub fn pause(env: Env) -> Result<(), Error> {
        storage::require_owner(&env)?;
        storage::set_pause_state(&env, true);
        events::emit_paused(&env, &storage::get_owner(&env));
        Ok(())
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        storage::require_owner(&env)?;
        storage::set_pause_state(&env, false);
        events::emit_unpaused(&env, &storage::get_owner(&env));
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ========================================================================
    // Epoch controller
    // ========================================================================

    pub fn end_epoch(env: Env) -> Result<(), Error> {
        epoch::end_epoch(&env)
    }

    pub fn start_epoch(env: Env, dm_fee_pct: u32) -> Result<u32, Error> {
        epoch::start_epoch(&env, dm_fee_pct)
    }

    pub fn get_epoch(env: Env, index: u32) -> Option<EpochInfo> {
        views::get_epoch(&env, index)
    }

    pub fn get_current_epoch(env: Env) -> EpochInfo {
        views::get_current_epoch(&env)
    }

    // ========================================================================
    // Skill registry
    // ========================================================================

    pub fn add_skill(env: Env, name: String, content: Bytes) -> Result<u32, Error> {
        skills::add_skill(&env, name, content)
    }

    pub fn update_skill(env: Env, skill_id: u32, content: Bytes) -> Result<(), Error> {
        skills::update_skill(&env, skill_id, content)
    }

    pub fn remove_skill(env: Env, skill_id: u32) -> Result<(), Error> {
        skills::remove_skill(&env, skill_id)
    }

    pub fn get_skill(env: Env, skill_id: u32) -> Option<Skill> {
        views::get_skill(&env, skill_id)
    }

    // ========================================================================
    // Dungeon registry
    // ========================================================================

    pub fn stake_dungeon(env: Env, owner: Address, external_asset_id: u64) -> Result<u32, Error> {
        dungeon::stake_dungeon(&env, owner, external_asset_id)
    }

    pub fn unstake_dungeon(env: Env, dungeon_id: u32, owner: Address) -> Result<(), Error> {
        dungeon::unstake_dungeon(&env, dungeon_id, owner)
    }

    pub fn get_dungeon(env: Env, dungeon_id: u32) -> Option<Dungeon> {
        views::get_dungeon(&env, dungeon_id)
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    pub fn enter_dungeon(env: Env, agent: Address, dungeon_id: u32, bond_amount: i128) -> Result<u32, Error> {
        session::enter_dungeon(&env, agent, dungeon_id, bond_amount)
    }

    pub fn accept_dm(env: Env, session_id: u32, claimed_dm_epoch: u32, dm_address: Address) -> Result<(), Error> {
        session::accept_dm(&env, session_id, claimed_dm_epoch, dm_address)
    }

    pub fn reroll_dm(env: Env, session_id: u32) -> Result<(), Error> {
        session::reroll_dm(&env, session_id)
    }

    pub fn submit_action(env: Env, session_id: u32, turn_index: u32, text: String, player: Address) -> Result<(), Error> {
        session::submit_action(&env, session_id, turn_index, text, player)
    }

    pub fn submit_dm_response(
        env: Env,
        session_id: u32,
        turn_index: u32,
        narrative: String,
        actions: Vec<DMAction>,
        dm: Address,
    ) -> Result<(), Error> {
        session::submit_dm_response(&env, session_id, turn_index, narrative, actions, dm)
    }

    pub fn flee(env: Env, session_id: u32, agent: Address) -> Result<(), Error> {
        session::flee(&env, session_id, agent)
    }

    pub fn timeout_advance(env: Env, session_id: u32) -> Result<(), Error> {
        session::timeout_advance(&env, session_id)
    }

    pub fn timeout_session(env: Env, session_id: u32) -> Result<(), Error> {
        session::timeout_session(&env, session_id)
    }

    pub fn get_session(env: Env, session_id: u32) -> Option<Session> {
        views::get_session(&env, session_id)
    }

    // ========================================================================
    // Reward accounting & bond escrow
    // ========================================================================

    pub fn award_from_loot_pool(env: Env, session_id: u32, dm: Address, target: Address, amount: i128) -> Result<(), Error> {
        rewards::award_from_loot_pool(&env, session_id, dm, target, amount)
    }

    pub fn claim_royalties(env: Env, caller: Address) -> Result<i128, Error> {
        rewards::claim_royalties(&env, caller)
    }

    pub fn withdraw_bond(env: Env, caller: Address) -> Result<i128, Error> {
        escrow::withdraw_bond(&env, caller)
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn get_withdrawable_bond(env: Env, participant: Address) -> i128 {
        views::get_withdrawable_bond(&env, participant)
    }

    pub fn get_pending_royalties(env: Env, owner: Address) -> i128 {
        views::get_pending_royalties(&env, owner)
    }

    pub fn get_xp(env: Env, agent: Address) -> i128 {
        views::get_xp(&env, agent)
    }

    pub fn get_total_gold_earned(env: Env, agent: Address) -> i128 {
        views::get_total_gold_earned(&env, agent)
    }

    pub fn get_bond(env: Env, session_id: u32, participant: Address) -> i128 {
        views::get_bond(&env, session_id, participant)
    }

    pub fn get_session_player_gold(env: Env, session_id: u32, participant: Address) -> i128 {
        views::get_session_player_gold(&env, session_id, participant)
    }

    pub fn is_player_alive(env: Env, session_id: u32, participant: Address) -> bool {
        views::is_player_alive(&env, session_id, participant)
    }

    pub fn get_active_session_count(env: Env) -> u32 {
        views::get_active_session_count(&env)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests;
