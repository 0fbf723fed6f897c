use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use super::testutils::{assert_contract_error, setup_harness, setup_test_env, Error};

#[test]
fn test_constructor_sets_owner_and_unpaused() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    assert_eq!(harness.core.get_owner(), harness.owner);
    assert!(!harness.core.is_paused());
    assert_eq!(harness.core.get_runner(), Some(harness.runner.clone()));
}

#[test]
fn test_register_and_unregister_agent() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let agent = Address::generate(&env);

    assert!(!harness.core.is_registered(&agent));
    harness.core.register_agent(&agent);
    assert!(harness.core.is_registered(&agent));
    harness.core.unregister_agent(&agent);
    assert!(!harness.core.is_registered(&agent));
}

#[test]
fn test_pause_blocks_entry() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent);

    harness.core.pause();
    let result = harness.core.try_enter_dungeon(&agent, &dungeon_id, &crate::constants::ENTRY_BOND);
    assert_contract_error(&result, Error::ContractPaused);

    harness.core.unpause();
    let session_id = harness.core.enter_dungeon(&agent, &dungeon_id, &crate::constants::ENTRY_BOND);
    assert_eq!(session_id, 0);
}

#[test]
fn test_stake_and_unstake_dungeon() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 42, 5, 3);
    let dungeon = harness.core.get_dungeon(&dungeon_id).unwrap();
    assert_eq!(dungeon.external_asset_id, 42);
    assert!(dungeon.active);
    assert!(dungeon.current_session_id.is_none());
    assert_eq!(harness.registry.owner_of(&42), harness.core.address);

    harness.core.unstake_dungeon(&dungeon_id, &dungeon_owner);
    let dungeon = harness.core.get_dungeon(&dungeon_id).unwrap();
    assert!(!dungeon.active);
    assert_eq!(harness.registry.owner_of(&42), dungeon_owner);
}

#[test]
fn test_pause_blocks_stake_dungeon() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);

    harness.registry.set_asset(
        &9,
        &dungeon_owner,
        &crate::types::DungeonTraits {
            difficulty: 1,
            party_size: 2,
            theme: soroban_sdk::String::from_str(&env, "crypt"),
            rarity: soroban_sdk::String::from_str(&env, "rare"),
        },
    );

    harness.core.pause();
    let result = harness.core.try_stake_dungeon(&dungeon_owner, &9);
    assert_contract_error(&result, Error::ContractPaused);

    harness.core.unpause();
    let dungeon_id = harness.core.stake_dungeon(&dungeon_owner, &9);
    assert!(harness.core.get_dungeon(&dungeon_id).unwrap().active);
}

#[test]
fn test_pause_blocks_submit_action_and_dm_response() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let p1 = Address::generate(&env);
    let p2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 2, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&p1);
    harness.fund_agent(&p2);

    let session_id = harness.core.enter_dungeon(&p1, &dungeon_id, &crate::constants::ENTRY_BOND);
    harness.core.enter_dungeon(&p2, &dungeon_id, &crate::constants::ENTRY_BOND);

    let session = harness.core.get_session(&session_id).unwrap();
    let dm = session.dm.clone().unwrap();
    harness.core.accept_dm(&session_id, &session.dm_epoch, &dm);

    let session = harness.core.get_session(&session_id).unwrap();
    let actor = session.current_actor.clone().unwrap();

    harness.core.pause();

    let result = harness.core.try_submit_action(
        &session_id,
        &session.turn_number,
        &soroban_sdk::String::from_str(&env, "look around"),
        &actor,
    );
    assert_contract_error(&result, Error::ContractPaused);

    let result = harness.core.try_submit_dm_response(
        &session_id,
        &session.turn_number,
        &soroban_sdk::String::from_str(&env, "narrative"),
        &soroban_sdk::Vec::new(&env),
        &dm,
    );
    assert_contract_error(&result, Error::ContractPaused);

    harness.core.unpause();
    harness.core.submit_action(
        &session_id,
        &session.turn_number,
        &soroban_sdk::String::from_str(&env, "look around"),
        &actor,
    );
}

#[test]
fn test_stake_dungeon_requires_asset_ownership() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let real_owner = Address::generate(&env);
    let impostor = Address::generate(&env);

    harness.registry.set_asset(
        &7,
        &real_owner,
        &crate::types::DungeonTraits {
            difficulty: 1,
            party_size: 2,
            theme: soroban_sdk::String::from_str(&env, "crypt"),
            rarity: soroban_sdk::String::from_str(&env, "rare"),
        },
    );

    let result = harness.core.try_stake_dungeon(&impostor, &7);
    assert_contract_error(&result, Error::NotOwner);
}
