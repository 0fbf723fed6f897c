use soroban_sdk::contracterror;

/// Error codes for the dungeon-core contract, banded by category (spec §7).
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ========================================================================
    // Permission errors (10-19)
    // ========================================================================
    NotRegistered = 10,
    NotRunner = 11,
    NotOwner = 12,
    NotDungeonOwner = 13,
    NotDM = 14,

    // ========================================================================
    // Precondition errors (20-39)
    // ========================================================================
    SessionNotActive = 20,
    SessionNotWaiting = 21,
    NotYourTurn = 22,
    WrongTurn = 23,
    AlreadyInParty = 24,
    NoActionYet = 25,
    StaleEpoch = 26,
    DeadlineNotPassed = 27,
    NotTimedOut = 28,
    EpochNotActive = 29,
    EpochNotGrace = 30,
    GracePeriodActive = 31,
    PartyFull = 32,
    PlayerNotAlive = 33,
    DungeonHasLiveSession = 34,

    // ========================================================================
    // Resource errors (40-59)
    // ========================================================================
    InsufficientBond = 40,
    InsufficientTickets = 41,
    GoldCapExceeded = 42,
    XpCapExceeded = 43,
    ActionTooLong = 44,
    NarrativeTooLong = 45,
    SkillTooLong = 46,
    InvalidDifficulty = 47,
    InvalidPartySize = 48,
    InvalidSkillId = 49,
    NothingToWithdraw = 50,
    DungeonNotActive = 51,
    DungeonNotFound = 52,
    SessionNotFound = 53,
    OverflowError = 54,

    // ========================================================================
    // Environment errors (60-69)
    // ========================================================================
    ExternalTransferFailed = 60,

    // ========================================================================
    // Emergency errors (70-79)
    // ========================================================================
    ContractPaused = 70,
}
