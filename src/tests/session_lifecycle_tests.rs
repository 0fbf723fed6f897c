use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, String};

use crate::constants::ENTRY_BOND;
use crate::types::{DMAction, DMActionKind, SessionState};

use super::testutils::{assert_contract_error, setup_harness, setup_test_env, Error};

/// Fills a 2-player dungeon and returns (session_id, dm, party_member).
fn fill_party(
    harness: &super::testutils::TestHarness<'_>,
    dungeon_id: u32,
    agent1: &Address,
    agent2: &Address,
) -> (u32, Address, Address) {
    harness.fund_agent(agent1);
    harness.fund_agent(agent2);
    harness.core.enter_dungeon(agent1, &dungeon_id, &ENTRY_BOND);
    let session_id = harness.core.enter_dungeon(agent2, &dungeon_id, &ENTRY_BOND);

    let session = harness.core.get_session(&session_id).unwrap();
    let dm = session.dm.clone().unwrap();
    let party_member = session.party.get(0).unwrap();
    (session_id, dm, party_member)
}

#[test]
fn test_entering_below_party_size_waits() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    harness.fund_agent(&agent1);

    let session_id = harness.core.enter_dungeon(&agent1, &dungeon_id, &ENTRY_BOND);
    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::Waiting);
    assert!(session.dm.is_none());
}

#[test]
fn test_full_party_triggers_dm_selection() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    let (session_id, dm, party_member) = fill_party(&harness, dungeon_id, &agent1, &agent2);

    assert_ne!(dm, party_member);
    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::WaitingDM);
    assert_eq!(session.party.len(), 1);
}

#[test]
fn test_accept_dm_rejects_stale_epoch() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    let (session_id, dm, _) = fill_party(&harness, dungeon_id, &agent1, &agent2);

    let result = harness.core.try_accept_dm(&session_id, &99, &dm);
    assert_contract_error(&result, Error::StaleEpoch);
}

#[test]
fn test_full_turn_loop_to_completion() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    let (session_id, dm, party_member) = fill_party(&harness, dungeon_id, &agent1, &agent2);

    let session = harness.core.get_session(&session_id).unwrap();
    harness.core.accept_dm(&session_id, &session.dm_epoch, &dm);

    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::Active);
    assert_eq!(session.current_actor, Some(party_member.clone()));

    harness.core.submit_action(
        &session_id,
        &1,
        &String::from_str(&env, "I search the rubble for loot."),
        &party_member,
    );

    let reward = DMAction {
        kind: DMActionKind::RewardGold,
        target: Some(party_member.clone()),
        value: 40,
        narrative: String::from_str(&env, ""),
    };
    let finish = DMAction {
        kind: DMActionKind::Complete,
        target: None,
        value: 0,
        narrative: String::from_str(&env, ""),
    };
    harness.core.submit_dm_response(
        &session_id,
        &1,
        &String::from_str(&env, "You find a pouch of gold and the exit opens."),
        &vec![&env, reward, finish],
        &dm,
    );

    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::Completed);

    assert_eq!(harness.core.get_withdrawable_bond(&dm), ENTRY_BOND);
    assert_eq!(harness.core.get_withdrawable_bond(&party_member), ENTRY_BOND);
    assert!(harness.core.get_total_gold_earned(&party_member) > 0);
    assert!(harness.core.get_total_gold_earned(&dm) > 0);
    assert!(harness.core.get_pending_royalties(&dungeon_owner) > 0);

    let dungeon = harness.core.get_dungeon(&dungeon_id).unwrap();
    assert!(dungeon.current_session_id.is_none());
    assert_eq!(harness.core.get_active_session_count(), 0);
}

#[test]
fn test_submit_action_rejects_wrong_turn_holder() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    let (session_id, dm, _) = fill_party(&harness, dungeon_id, &agent1, &agent2);

    let session = harness.core.get_session(&session_id).unwrap();
    harness.core.accept_dm(&session_id, &session.dm_epoch, &dm);

    let result = harness.core.try_submit_action(
        &session_id,
        &1,
        &String::from_str(&env, "I act out of turn."),
        &dm,
    );
    assert_contract_error(&result, Error::NotYourTurn);
}

#[test]
fn test_flee_keeps_gold_minus_royalty_and_returns_bond() {
    let env = setup_test_env();
    let harness = setup_harness(&env);
    let dungeon_owner = Address::generate(&env);
    let agent1 = Address::generate(&env);
    let agent2 = Address::generate(&env);

    let dungeon_id = harness.setup_dungeon(&env, &dungeon_owner, 1, 3, 2);
    harness.core.start_epoch(&15);
    let (session_id, dm, party_member) = fill_party(&harness, dungeon_id, &agent1, &agent2);

    let session = harness.core.get_session(&session_id).unwrap();
    harness.core.accept_dm(&session_id, &session.dm_epoch, &dm);

    harness.core.flee(&session_id, &party_member);

    let session = harness.core.get_session(&session_id).unwrap();
    assert_eq!(session.state, SessionState::Failed);
    assert_eq!(harness.core.get_withdrawable_bond(&party_member), ENTRY_BOND);
}
