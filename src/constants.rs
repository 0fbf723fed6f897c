//! Bit-exact numeric constants (spec §6).

/// Native-value entry bond, in stroops: 10^16.
pub const ENTRY_BOND: i128 = 10_000_000_000_000_000;

pub const DM_ACCEPT_TIMEOUT: u64 = 300;
pub const TURN_TIMEOUT: u64 = 300;
pub const SESSION_TIMEOUT: u64 = 14_400;
pub const MAX_GRACE_PERIOD: u64 = 172_800;

pub const MAX_ACTION_LENGTH: u32 = 1_000;
pub const MAX_NARRATIVE_LENGTH: u32 = 2_000;
pub const MAX_SKILL_LENGTH: u32 = 50_000;

pub const MAX_GOLD_PER_ACTION: i128 = 100;
pub const MAX_XP_PER_ACTION: i128 = 50;
pub const BASE_GOLD_RATE: i128 = 100;

pub const ROYALTY_BPS: i128 = 500;
pub const DM_FEE_PERCENT: u32 = 15;
pub const DEFAULT_MAX_GOLD_PER_SESSION: i128 = 500;

/// Ticket kind consumed on entry (component 1 external collaborator convention).
pub const ENTRY_TICKET_KIND: u32 = 0;

/// Minimum/maximum party size enforced by the dungeon-asset layer (spec §9 note 2).
pub const MIN_PARTY_SIZE: u32 = 2;
pub const MAX_PARTY_SIZE: u32 = 6;

/// Storage TTL thresholds, in ledgers (~5s/ledger).
pub const TTL_THRESHOLD_LEDGERS: u32 = 120_960; // ~7 days
pub const TTL_EXTEND_TO_LEDGERS: u32 = 518_400; // ~30 days
