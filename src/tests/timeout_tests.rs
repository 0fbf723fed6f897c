use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, String};

use crate::constants::{DM_ACCEPT_TIMEOUT, ENTRY_BOND, SESSION_TIMEOUT, TURN_TIMEOUT};
use crate::types::SessionState;

use super::testutils::{assert_contract_error, setup_harness, setup_test_env, Error};

#[test]
fn test_reroll_dm_requires_deadline_passed() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);
    let agent3 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 3);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent1);
    harness.fund_agent(&agent2);
    harness.fund_agent(&agent3);
    harness.core.enter_dungeon(&agent1, &dungeon_id, &ENTRY_BOND);
    harness.core.enter_dungeon(&agent2, &dungeon_id, &ENTRY_BOND);
    let session_id = harness.core.enter_dungeon(&agent3, &dungeon_id, &ENTRY_BOND);

    let result = harness.core.try_reroll_dm(&session_id);
    assert_contract_error(&result, Error::DeadlineNotPassed);
}

#[test]
fn test_reroll_dm_after_deadline_selects_a_new_dm() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);
    let agent3 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 3);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent1);
    harness.fund_agent(&agent2);
    harness.fund_agent(&agent3);
    harness.core.enter_dungeon(&agent1, &dungeon_id, &ENTRY_BOND);
    harness.core.enter_dungeon(&agent2, &dungeon_id, &ENTRY_BOND);
    let session_id = harness.core.enter_dungeon(&agent3, &dungeon_id, &ENTRY_BOND);

    let before = harness.core.get_session(&session_id).unwrap();
    let old_dm = before.dm.clone().unwrap();
    let old_dm_epoch = before.dm_epoch;

    harness.advance_time(&env, DM_ACCEPT_TIMEOUT + 1);
    harness.core.reroll_dm(&session_id);

    let after = harness.core.get_session(&session_id).unwrap();
    assert_eq!(after.state, SessionState::WaitingDM);
    assert_ne!(after.dm.clone().unwrap(), old_dm);
    assert!(after.dm_epoch > old_dm_epoch);
    assert_eq!(after.all_players.len(), 2);

    let dungeon = harness.core.get_dungeon(&dungeon_id).unwrap();
    assert_eq!(dungeon.loot_pool_native, ENTRY_BOND);
}

#[test]
fn test_turn_timeout_skips_delinquent_player_then_falls_back_to_dm() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent1);
    harness.fund_agent(&agent2);
    harness.core.enter_dungeon(&agent1, &dungeon_id, &ENTRY_BOND);
    let session_id = harness.core.enter_dungeon(&agent2, &dungeon_id, &ENTRY_BOND);

    let session = harness.core.get_session(&session_id).unwrap();
    let dm = session.dm.clone().unwrap();
    let party_member = session.party.get(0).unwrap();
    harness.core.accept_dm(&session_id, &session.dm_epoch, &dm);

    let result = harness.core.try_timeout_advance(&session_id);
    assert_contract_error(&result, Error::DeadlineNotPassed);

    harness.advance_time(&env, TURN_TIMEOUT + 1);
    harness.core.timeout_advance(&session_id);

    // Only-party-member timed out with no one left to hand off to: the
    // scheduler falls back to the DM.
    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.current_actor, Some(dm.clone()));
    assert_eq!(session.state, SessionState::Active);
    let _ = party_member;

    harness.advance_time(&env, TURN_TIMEOUT + 1);
    harness.core.timeout_advance(&session_id);

    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::Failed);
}

#[test]
fn test_session_timeout_from_waiting_dm_releases_bonds_without_forfeiture() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent1);
    harness.fund_agent(&agent2);
    harness.core.enter_dungeon(&agent1, &dungeon_id, &ENTRY_BOND);
    let session_id = harness.core.enter_dungeon(&agent2, &dungeon_id, &ENTRY_BOND);

    let result = harness.core.try_timeout_session(&session_id);
    assert_contract_error(&result, Error::DeadlineNotPassed);

    harness.advance_time(&env, SESSION_TIMEOUT + 1);
    harness.core.timeout_session(&session_id);

    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::TimedOut);

    for p in session.all_players.iter() {
        assert_eq!(harness.core.get_withdrawable_bond(&p), ENTRY_BOND);
    }

    let dungeon = harness.core.get_dungeon(&dungeon_id).unwrap();
    assert_eq!(dungeon.loot_pool_native, 0);
    assert!(dungeon.current_session_id.is_none());
}

#[test]
fn test_submit_dm_response_requires_action_first() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent1);
    harness.fund_agent(&agent2);
    harness.core.enter_dungeon(&agent1, &dungeon_id, &ENTRY_BOND);
    let session_id = harness.core.enter_dungeon(&agent2, &dungeon_id, &ENTRY_BOND);

    let session = harness.core.get_session(&session_id).unwrap();
    let dm = session.dm.clone().unwrap();
    harness.core.accept_dm(&session_id, &session.dm_epoch, &dm);

    let result = harness.core.try_submit_dm_response(
        &session_id,
        &1,
        &String::from_str(&env, "not yet"),
        &soroban_sdk::vec![&env],
        &dm,
    );
    assert_contract_error(&result, Error::NoActionYet);
}
