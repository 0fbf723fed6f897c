use soroban_sdk::{Address, Env};

use crate::dungeon_asset::DungeonAssetRegistryClient;
use crate::epoch;
use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{Dungeon, EpochState};

/// Verifies ownership, allocates a new dungeon slot, then pulls the external
/// asset into this contract's custody via `transfer_from`. Grace-only (spec
/// §4.2).
pub fn stake_dungeon(env: &Env, owner: Address, external_asset_id: u64) -> Result<u32, Error> {
    owner.require_auth();
    storage::require_not_paused(env)?;
    require_grace(env)?;

    let config = storage::get_config(env);
    let registry = DungeonAssetRegistryClient::new(env, &config.dungeon_asset_registry);
    let asset_owner = registry.owner_of(&external_asset_id);
    if asset_owner != owner {
        return Err(Error::NotOwner);
    }

    let id = storage::next_dungeon_id(env);
    let dungeon = Dungeon {
        external_asset_id,
        owner: owner.clone(),
        active: true,
        loot_pool_native: 0,
        loot_pool_gold: 0,
        current_session_id: None,
    };
    storage::set_dungeon(env, id, &dungeon);

    registry.transfer_from(&owner, &env.current_contract_address(), &external_asset_id);

    events::emit_dungeon_activated(env, id, &owner, external_asset_id);
    Ok(id)
}

/// Deactivates the slot, then transfers the asset back to its owner via
/// `transfer_from`. Grace-only, caller must be the dungeon owner, only
/// permitted when no session is live.
pub fn unstake_dungeon(env: &Env, dungeon_id: u32, owner: Address) -> Result<(), Error> {
    owner.require_auth();
    require_grace(env)?;

    let mut dungeon = storage::get_dungeon(env, dungeon_id).ok_or(Error::DungeonNotFound)?;
    if dungeon.owner != owner {
        return Err(Error::NotDungeonOwner);
    }
    if dungeon.current_session_id.is_some() {
        return Err(Error::DungeonHasLiveSession);
    }

    dungeon.active = false;
    storage::set_dungeon(env, dungeon_id, &dungeon);

    let config = storage::get_config(env);
    let registry = DungeonAssetRegistryClient::new(env, &config.dungeon_asset_registry);
    registry.transfer_from(&env.current_contract_address(), &owner, &dungeon.external_asset_id);

    events::emit_dungeon_deactivated(env, dungeon_id, &owner);
    Ok(())
}

pub fn get_dungeon(env: &Env, dungeon_id: u32) -> Option<Dungeon> {
    storage::get_dungeon(env, dungeon_id)
}

fn require_grace(env: &Env) -> Result<(), Error> {
    if epoch::get_current_epoch(env).state != EpochState::Grace {
        return Err(Error::EpochNotGrace);
    }
    Ok(())
}
