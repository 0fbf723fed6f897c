use soroban_sdk::{Address, Env};

use crate::dungeon;
use crate::epoch;
use crate::escrow;
use crate::identity;
use crate::session;
use crate::skills;
use crate::storage;
use crate::types::{Dungeon, EpochInfo, Session, Skill};

pub fn get_session(env: &Env, session_id: u32) -> Option<Session> {
    session::get_session(env, session_id)
}

pub fn get_dungeon(env: &Env, dungeon_id: u32) -> Option<Dungeon> {
    dungeon::get_dungeon(env, dungeon_id)
}

pub fn get_skill(env: &Env, skill_id: u32) -> Option<Skill> {
    skills::get_skill(env, skill_id)
}

pub fn get_epoch(env: &Env, index: u32) -> Option<EpochInfo> {
    epoch::get_epoch(env, index)
}

pub fn get_current_epoch(env: &Env) -> EpochInfo {
    epoch::get_current_epoch(env)
}

pub fn is_registered(env: &Env, agent: Address) -> bool {
    identity::is_registered(env, agent)
}

pub fn get_runner(env: &Env) -> Option<Address> {
    identity::get_runner(env)
}

pub fn get_withdrawable_bond(env: &Env, participant: Address) -> i128 {
    escrow::get_withdrawable(env, participant)
}

pub fn get_pending_royalties(env: &Env, owner: Address) -> i128 {
    storage::get_pending_royalty(env, &owner)
}

pub fn get_xp(env: &Env, agent: Address) -> i128 {
    storage::get_xp(env, &agent)
}

pub fn get_total_gold_earned(env: &Env, agent: Address) -> i128 {
    storage::get_total_gold_earned(env, &agent)
}

pub fn get_bond(env: &Env, session_id: u32, participant: Address) -> i128 {
    storage::get_bond(env, session_id, &participant)
}

pub fn get_session_player_gold(env: &Env, session_id: u32, participant: Address) -> i128 {
    storage::get_session_player_gold(env, session_id, &participant)
}

pub fn is_player_alive(env: &Env, session_id: u32, participant: Address) -> bool {
    storage::is_player_alive(env, session_id, &participant)
}

pub fn get_active_session_count(env: &Env) -> u32 {
    storage::get_active_session_count(env)
}
