use soroban_sdk::{Bytes, BytesN, Env};

use crate::constants::MAX_GRACE_PERIOD;
use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{EpochInfo, EpochState};

/// Owner-only. Active → Grace. Records `grace_start_ts` so `start_epoch`
/// can apply the 48h safety release while live sessions remain open.
pub fn end_epoch(env: &Env) -> Result<(), Error> {
    storage::require_owner(env)?;

    let index = storage::get_current_epoch_index(env);
    let mut info = current_or_init(env, index);
    if info.state != EpochState::Active {
        return Ok(());
    }
    info.state = EpochState::Grace;
    info.grace_start_ts = env.ledger().timestamp();
    storage::set_epoch(env, index, &info);

    events::emit_epoch_ended(env, index, info.grace_start_ts);
    Ok(())
}

/// Owner-only. Grace → Active, bumping the epoch index and pinning a new
/// skill hash + DM fee percent for the lifetime of every session created
/// under it (spec §4.1).
pub fn start_epoch(env: &Env, dm_fee_pct: u32) -> Result<u32, Error> {
    storage::require_owner(env)?;

    let index = storage::get_current_epoch_index(env);
    let info = current_or_init(env, index);

    if info.state != EpochState::Grace {
        return Err(Error::EpochNotGrace);
    }

    let active_sessions = storage::get_active_session_count(env);
    let grace_elapsed = env.ledger().timestamp().saturating_sub(info.grace_start_ts);
    if active_sessions > 0 && grace_elapsed <= MAX_GRACE_PERIOD {
        return Err(Error::GracePeriodActive);
    }

    let skill_hash = compute_skill_hash(env);
    let next_index = index + 1;
    let new_info = EpochInfo {
        index: next_index,
        state: EpochState::Active,
        grace_start_ts: 0,
        skill_hash: skill_hash.clone(),
        dm_fee_pct,
    };
    storage::set_current_epoch_index(env, next_index);
    storage::set_epoch(env, next_index, &new_info);

    events::emit_epoch_started(env, next_index, &skill_hash, dm_fee_pct);
    Ok(next_index)
}

pub fn get_epoch(env: &Env, index: u32) -> Option<EpochInfo> {
    storage::get_epoch(env, index)
}

pub fn get_current_epoch(env: &Env) -> EpochInfo {
    let index = storage::get_current_epoch_index(env);
    current_or_init(env, index)
}

pub(crate) fn require_active(env: &Env) -> Result<u32, Error> {
    let info = get_current_epoch(env);
    if info.state != EpochState::Active {
        return Err(Error::EpochNotActive);
    }
    Ok(info.index)
}

/// The engine starts in Grace (index 0, zeroed skill hash) so the owner can
/// stake dungeons and upload skills before the first Active epoch.
fn current_or_init(env: &Env, index: u32) -> EpochInfo {
    storage::get_epoch(env, index).unwrap_or_else(|| EpochInfo {
        index,
        state: EpochState::Grace,
        grace_start_ts: 0,
        skill_hash: BytesN::from_array(env, &[0u8; 32]),
        dm_fee_pct: 0,
    })
}

/// `digest(concat(skill[0].content, skill[1].content, …))`, ordering = the
/// skill registry's append order. O(Σ|content|); acceptable given the
/// per-skill size cap.
fn compute_skill_hash(env: &Env) -> BytesN<32> {
    let order = storage::get_skill_order(env);
    let mut buf = Bytes::new(env);
    for skill_id in order.iter() {
        if let Some(skill) = storage::get_skill(env, skill_id) {
            buf.append(&skill.content);
        }
    }
    env.crypto().sha256(&buf).into()
}
