use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Bytes};

use crate::types::EpochState;

use super::testutils::{assert_contract_error, setup_harness, setup_test_env, Error};

#[test]
fn test_genesis_epoch_is_grace() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    let epoch = harness.core.get_current_epoch();
    assert_eq!(epoch.index, 0);
    assert_eq!(epoch.state, EpochState::Grace);
}

#[test]
fn test_start_epoch_moves_to_active_and_bumps_index() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    let index = harness.core.start_epoch(&15);
    assert_eq!(index, 1);

    let epoch = harness.core.get_current_epoch();
    assert_eq!(epoch.state, EpochState::Active);
    assert_eq!(epoch.dm_fee_pct, 15);
}

#[test]
fn test_start_epoch_requires_grace() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    harness.core.start_epoch(&15);
    let result = harness.core.try_start_epoch(&10);
    assert_contract_error(&result, Error::EpochNotGrace);
}

#[test]
fn test_end_epoch_returns_to_grace() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    harness.core.start_epoch(&15);
    harness.core.end_epoch();

    let epoch = harness.core.get_current_epoch();
    assert_eq!(epoch.state, EpochState::Grace);
}

#[test]
fn test_start_epoch_blocked_by_live_sessions_within_grace_window() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent);
    harness.core.enter_dungeon(&agent, &dungeon_id, &crate::constants::ENTRY_BOND);

    harness.core.end_epoch();
    let result = harness.core.try_start_epoch(&15);
    assert_contract_error(&result, Error::GracePeriodActive);
}

#[test]
fn test_start_epoch_allowed_after_grace_period_elapses() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent);
    harness.core.enter_dungeon(&agent, &dungeon_id, &crate::constants::ENTRY_BOND);

    harness.core.end_epoch();
    harness.advance_time(&env, crate::constants::MAX_GRACE_PERIOD + 1);

    let index = harness.core.start_epoch(&15);
    assert_eq!(index, 2);
}

#[test]
fn test_skill_hash_changes_when_skills_added_between_epochs() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    let epoch_a = harness.core.start_epoch(&15);
    let hash_a = harness.core.get_epoch(&epoch_a).unwrap().skill_hash;

    harness.core.end_epoch();
    harness.core.add_skill(
        &soroban_sdk::String::from_str(&env, "fireball"),
        &Bytes::from_array(&env, &[1, 2, 3, 4]),
    );
    let epoch_b = harness.core.start_epoch(&20);
    let hash_b = harness.core.get_epoch(&epoch_b).unwrap().skill_hash;

    assert_ne!(hash_a, hash_b);
}

#[test]
fn test_update_and_remove_skill_require_grace() {
    let env = setup_test_env();
    let harness = setup_harness(&env);

    let skill_id = harness.core.add_skill(
        &soroban_sdk::String::from_str(&env, "heal"),
        &Bytes::from_array(&env, &[9, 9]),
    );
    harness.core.start_epoch(&15);

    let result = harness.core.try_update_skill(&skill_id, &Bytes::from_array(&env, &[1]));
    assert_contract_error(&result, Error::EpochNotGrace);

    harness.core.end_epoch();
    harness.core.update_skill(&skill_id, &Bytes::from_array(&env, &[1]));
    assert_eq!(harness.core.get_skill(&skill_id).unwrap().content, Bytes::from_array(&env, &[1]));

    harness.core.remove_skill(&skill_id);
    assert!(harness.core.get_skill(&skill_id).is_none());
}
