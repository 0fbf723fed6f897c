use soroban_sdk::{contractclient, Address, Env};

use crate::types::DungeonTraits;

/// Interface to the external dungeon-asset registry (spec §1 collaborators).
/// Owns the NFT-like representation of a dungeon and the traits (difficulty,
/// party size, theme, rarity) that drive session mechanics here.
#[contractclient(name = "DungeonAssetRegistryClient")]
pub trait DungeonAssetRegistry {
    fn owner_of(env: Env, asset_id: u64) -> Address;
    fn traits_of(env: Env, asset_id: u64) -> DungeonTraits;
    fn transfer_from(env: Env, from: Address, to: Address, asset_id: u64);
}
