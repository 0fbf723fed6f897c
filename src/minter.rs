use soroban_sdk::{contractclient, Address, Env};

/// Interface to the external reward-token minter (spec §1, component 1
/// collaborators). The game contract is trusted by the minter to request
/// mints/burns of gold and XP on behalf of agents.
#[contractclient(name = "MinterClient")]
pub trait Minter {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
}
