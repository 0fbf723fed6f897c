#![allow(dead_code)]
use soroban_sdk::{contracttype, Address, Bytes, BytesN, String, Vec};

// ============================================================================
// Epoch
// ============================================================================

/// Two-phase global clock state (spec §3 Epoch, §4.1).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EpochState {
    Active,
    Grace,
}

/// Epoch metadata, pinned for the lifetime of every session created under it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EpochInfo {
    pub index: u32,
    pub state: EpochState,
    pub grace_start_ts: u64,
    /// Digest of the concatenation of every skill's content, at the moment
    /// this epoch started. Zeroed while the epoch is still in its initial Grace.
    pub skill_hash: BytesN<32>,
    /// DM fee percentage snapshotted at `start_epoch`.
    pub dm_fee_pct: u32,
}

// ============================================================================
// Skills
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Skill {
    pub name: String,
    pub content: Bytes,
    pub updated_at: u64,
    /// Reserved for a future skill-cooldown mechanism; unused by this spec
    /// (see DESIGN.md Open Questions).
    pub locked_until: u64,
}

// ============================================================================
// Dungeons
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dungeon {
    pub external_asset_id: u64,
    pub owner: Address,
    pub active: bool,
    /// Forfeited bonds, native value.
    pub loot_pool_native: i128,
    /// Forfeited session reward-token pools (separate counter, spec §9 note 1).
    pub loot_pool_gold: i128,
    pub current_session_id: Option<u32>,
}

/// Traits read from the external `DungeonAssetRegistry` at stake/entry time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DungeonTraits {
    pub difficulty: u32,
    pub party_size: u32,
    pub theme: String,
    pub rarity: String,
}

// ============================================================================
// Sessions
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    Waiting,
    WaitingDM,
    Active,
    Completed,
    Failed,
    Cancelled,
    TimedOut,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub dungeon_id: u32,
    pub dm: Option<Address>,
    pub party: Vec<Address>,
    pub all_players: Vec<Address>,
    pub state: SessionState,
    pub turn_number: u32,
    pub current_actor: Option<Address>,
    pub turn_deadline: u64,
    pub gold_pool: i128,
    pub max_gold: i128,
    /// Bit `i` set when `all_players[i]` has acted in the current turn.
    pub acted_this_turn_bitmap: u32,
    pub dm_accept_deadline: u64,
    pub last_activity_ts: u64,
    pub dm_epoch: u32,
    pub epoch_id: u32,
    pub party_size: u32,
}

// ============================================================================
// DM action dispatch (spec §4.4)
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DMActionKind {
    Narrate,
    RewardGold,
    RewardXp,
    Damage,
    KillPlayer,
    Complete,
    Fail,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DMAction {
    pub kind: DMActionKind,
    pub target: Option<Address>,
    pub value: i128,
    pub narrative: String,
}

// ============================================================================
// Configuration
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub minter: Address,
    pub dungeon_asset_registry: Address,
    pub ticket_registry: Address,
    pub native_token: Address,
    pub max_gold_per_session: i128,
}
