use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events;
use crate::storage;

/// Registers an agent, making it eligible to enter dungeons. Owner-only.
pub fn register_agent(env: &Env, agent: Address) -> Result<(), Error> {
    storage::require_owner(env)?;
    storage::set_agent_registered(env, &agent, true);
    events::emit_agent_registered(env, &agent);
    Ok(())
}

/// Removes an agent's eligibility. Owner-only. Does not affect sessions the
/// agent is already part of.
pub fn unregister_agent(env: &Env, agent: Address) -> Result<(), Error> {
    storage::require_owner(env)?;
    storage::set_agent_registered(env, &agent, false);
    events::emit_agent_unregistered(env, &agent);
    Ok(())
}

pub fn is_registered(env: &Env, agent: Address) -> bool {
    storage::is_agent_registered(env, &agent)
}

/// Sets the single privileged relay address (spec §4.8). Owner-only.
pub fn set_runner(env: &Env, runner: Address) -> Result<(), Error> {
    storage::require_owner(env)?;
    storage::set_runner(env, &runner);
    events::emit_runner_updated(env, &runner);
    Ok(())
}

pub fn get_runner(env: &Env) -> Option<Address> {
    storage::get_runner(env)
}

pub(crate) fn require_registered(env: &Env, agent: &Address) -> Result<(), Error> {
    if storage::is_agent_registered(env, agent) {
        Ok(())
    } else {
        Err(Error::NotRegistered)
    }
}
