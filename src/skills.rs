use soroban_sdk::{Bytes, Env, String};

use crate::constants::MAX_SKILL_LENGTH;
use crate::epoch;
use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{EpochState, Skill};

/// Appends a new skill blob. Owner-only, any epoch state.
pub fn add_skill(env: &Env, name: String, content: Bytes) -> Result<u32, Error> {
    storage::require_owner(env)?;

    if content.len() > MAX_SKILL_LENGTH {
        return Err(Error::SkillTooLong);
    }

    let id = storage::next_skill_id(env);
    let skill = Skill {
        name: name.clone(),
        content,
        updated_at: env.ledger().timestamp(),
        locked_until: 0,
    };
    storage::set_skill(env, id, &skill);

    let mut order = storage::get_skill_order(env);
    order.push_back(id);
    storage::set_skill_order(env, &order);

    events::emit_skill_added(env, id, &name);
    Ok(id)
}

/// In-place edit. Owner-only, Grace-only (spec §3 Skill).
pub fn update_skill(env: &Env, skill_id: u32, content: Bytes) -> Result<(), Error> {
    storage::require_owner(env)?;
    require_grace(env)?;

    if content.len() > MAX_SKILL_LENGTH {
        return Err(Error::SkillTooLong);
    }

    let mut skill = storage::get_skill(env, skill_id).ok_or(Error::InvalidSkillId)?;
    skill.content = content;
    skill.updated_at = env.ledger().timestamp();
    storage::set_skill(env, skill_id, &skill);

    events::emit_skill_updated(env, skill_id);
    Ok(())
}

/// Owner-only, Grace-only.
pub fn remove_skill(env: &Env, skill_id: u32) -> Result<(), Error> {
    storage::require_owner(env)?;
    require_grace(env)?;

    storage::get_skill(env, skill_id).ok_or(Error::InvalidSkillId)?;
    storage::remove_skill(env, skill_id);

    let order = storage::get_skill_order(env);
    let mut new_order = soroban_sdk::Vec::new(env);
    for id in order.iter() {
        if id != skill_id {
            new_order.push_back(id);
        }
    }
    storage::set_skill_order(env, &new_order);

    events::emit_skill_removed(env, skill_id);
    Ok(())
}

pub fn get_skill(env: &Env, skill_id: u32) -> Option<Skill> {
    storage::get_skill(env, skill_id)
}

fn require_grace(env: &Env) -> Result<(), Error> {
    if epoch::get_current_epoch(env).state != EpochState::Grace {
        return Err(Error::EpochNotGrace);
    }
    Ok(())
}
