use soroban_sdk::{contractclient, Address, Env};

/// Interface to the external ticket registry (spec §1 collaborators). Entry
/// tickets are consumed, not transferred, so this contract only ever calls
/// `consume` on behalf of an already-authorized agent.
#[contractclient(name = "TicketRegistryClient")]
pub trait TicketRegistry {
    fn balance_of(env: Env, owner: Address, kind: u32) -> u32;
    fn consume(env: Env, owner: Address, kind: u32, amount: u32);
}
