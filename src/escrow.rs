use soroban_sdk::{token, Address, Env};

use crate::errors::Error;
use crate::events;
use crate::storage;

/// Holds `amount` native value from `participant` against `session_id`, on
/// entry. The transfer must already have been pulled in by the caller
/// (checks-effects-interactions: bond recording happens before any transfer).
pub(crate) fn hold(env: &Env, session_id: u32, participant: &Address, amount: i128) {
    let current = storage::get_bond(env, session_id, participant);
    storage::set_bond(env, session_id, participant, current + amount);
}

/// Moves a held bond to a dungeon's native-value loot pool (delinquent DM,
/// failed session).
pub(crate) fn forfeit(env: &Env, session_id: u32, participant: &Address, dungeon_id: u32) -> i128 {
    let amount = storage::get_bond(env, session_id, participant);
    if amount == 0 {
        return 0;
    }
    storage::set_bond(env, session_id, participant, 0);

    let mut dungeon = storage::get_dungeon(env, dungeon_id).expect("dungeon must exist");
    dungeon.loot_pool_native += amount;
    storage::set_dungeon(env, dungeon_id, &dungeon);

    events::emit_bond_forfeited(env, session_id, participant, amount);
    events::emit_loot_pool_updated(env, dungeon_id, dungeon.loot_pool_native, dungeon.loot_pool_gold);
    amount
}

/// Moves a held bond to the participant's pull-payment queue (completion,
/// flee, cancellation, session timeout).
pub(crate) fn release(env: &Env, session_id: u32, participant: &Address) -> i128 {
    let amount = storage::get_bond(env, session_id, participant);
    if amount == 0 {
        return 0;
    }
    storage::set_bond(env, session_id, participant, 0);
    storage::add_withdrawable(env, participant, amount);
    amount
}

/// Pull-payment withdrawal. All state changes precede the outbound transfer
/// (spec §4.6); a failed transfer reverts the whole call, preserving balance.
pub fn withdraw_bond(env: &Env, caller: Address) -> Result<i128, Error> {
    caller.require_auth();

    let amount = storage::get_withdrawable(env, &caller);
    if amount == 0 {
        return Err(Error::NothingToWithdraw);
    }
    storage::set_withdrawable(env, &caller, 0);

    let config = storage::get_config(env);
    let native = token::Client::new(env, &config.native_token);
    native.transfer(&env.current_contract_address(), &caller, &amount);

    events::emit_bond_withdrawn(env, &caller, amount);
    Ok(amount)
}

pub fn get_withdrawable(env: &Env, participant: Address) -> i128 {
    storage::get_withdrawable(env, &participant)
}
