//! Randomized operation sequences against a live `RepTokens` instance.
//!
//! [`World`] deploys the contract with a fixed cast of accounts and applies
//! [`Op`]s through the generated client. After each op the ledger-wide
//! invariants are checked with [`World::check_invariants`], and a rejected op
//! must leave every balance exactly as it was.

use derive_arbitrary::Arbitrary;
use rep_tokens::{RepTokens, RepTokensClient, Role, REDEEMABLE_TOKEN_ID, SOULBOUND_TOKEN_ID};
use soroban_sdk::{testutils::Address as _, vec, Address, Bytes, Env};

pub const MINT_CAP: i128 = 1000;
pub const USERS: usize = 4;

/// Tracked IDs plus one the contract does not know about.
const CHECKED_IDS: [u32; 3] = [SOULBOUND_TOKEN_ID, REDEEMABLE_TOKEN_ID, 2];

#[derive(Arbitrary, Clone, Debug)]
pub enum Op {
    Mint { amount: u16 },
    Distribute { to: u8, amount: u16 },
    Transfer {
        operator: u8,
        from: u8,
        to: u8,
        id: u8,
        amount: u16,
    },
    Burn { amount: u16 },
    SoulboundRequest { from: u8, to: u8 },
    Approve { owner: u8, operator: u8, approved: bool },
}

pub struct World {
    pub env: Env,
    pub contract_id: Address,
    pub admin: Address,
    pub minter: Address,
    pub distributor: Address,
    pub burner: Address,
    pub transferer: Address,
    pub users: [Address; USERS],
}

impl World {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.budget().reset_unlimited();
        let contract_id = env.register_contract(None, RepTokens);

        let world = World {
            admin: Address::generate(&env),
            minter: Address::generate(&env),
            distributor: Address::generate(&env),
            burner: Address::generate(&env),
            transferer: Address::generate(&env),
            users: [
                Address::generate(&env),
                Address::generate(&env),
                Address::generate(&env),
                Address::generate(&env),
            ],
            contract_id,
            env,
        };

        let client = world.client();
        client.initialize(&vec![&world.env, world.admin.clone()], &MINT_CAP);
        client.grant_role(&world.admin, &Role::Minter, &world.minter);
        client.grant_role(&world.admin, &Role::Distributor, &world.distributor);
        client.grant_role(&world.admin, &Role::Burner, &world.burner);
        client.grant_role(&world.admin, &Role::SoulboundTransferer, &world.transferer);
        world
    }

    pub fn client(&self) -> RepTokensClient<'_> {
        RepTokensClient::new(&self.env, &self.contract_id)
    }

    /// Every account an op can touch. Users first so `u8` picks favour them.
    pub fn accounts(&self) -> Vec<Address> {
        let mut accounts = self.users.to_vec();
        accounts.push(self.burner.clone());
        accounts.push(self.distributor.clone());
        accounts.push(self.admin.clone());
        accounts.push(self.transferer.clone());
        accounts
    }

    fn pick(&self, index: u8) -> Address {
        let accounts = self.accounts();
        accounts[index as usize % accounts.len()].clone()
    }

    /// `(account, id) -> balance` for every account and checked ID.
    pub fn snapshot(&self) -> Vec<i128> {
        let client = self.client();
        let mut balances = Vec::new();
        for account in self.accounts() {
            for id in CHECKED_IDS {
                balances.push(client.balance_of(&account, &id));
            }
        }
        balances
    }

    /// Applies `op`, returning whether the contract accepted it.
    pub fn apply(&self, op: &Op) -> bool {
        let client = self.client();
        let data = Bytes::new(&self.env);
        match op {
            Op::Mint { amount } => client
                .try_mint(&self.minter, &self.distributor, &i128::from(*amount), &data)
                .is_ok(),
            Op::Distribute { to, amount } => client
                .try_distribute(
                    &self.distributor,
                    &self.distributor,
                    &self.pick(*to),
                    &i128::from(*amount),
                    &data,
                )
                .is_ok(),
            Op::Transfer {
                operator,
                from,
                to,
                id,
                amount,
            } => client
                .try_safe_transfer_from(
                    &self.pick(*operator),
                    &self.pick(*from),
                    &self.pick(*to),
                    &CHECKED_IDS[*id as usize % CHECKED_IDS.len()],
                    &i128::from(*amount),
                    &data,
                )
                .is_ok(),
            Op::Burn { amount } => client.try_burn(&self.burner, &i128::from(*amount)).is_ok(),
            Op::SoulboundRequest { from, to } => client
                .try_fulfill_soulbound_transfer(
                    &self.transferer,
                    &self.pick(*from),
                    &self.pick(*to),
                )
                .is_ok(),
            Op::Approve {
                owner,
                operator,
                approved,
            } => client
                .try_set_approval_for_all(&self.pick(*owner), &self.pick(*operator), approved)
                .is_ok(),
        }
    }

    /// Supply equals the sum of balances, unknown IDs stay empty, and the
    /// holder index lists exactly the accounts with a positive balance.
    pub fn check_invariants(&self) {
        let client = self.client();
        let accounts = self.accounts();
        for id in [SOULBOUND_TOKEN_ID, REDEEMABLE_TOKEN_ID] {
            let mut sum = 0i128;
            let owners = client.get_owners_of_token_id(&id);
            assert_eq!(client.get_owners_of_token_id_length(&id), owners.len());

            for account in accounts.iter() {
                let balance = client.balance_of(account, &id);
                assert!(balance >= 0, "negative balance");
                sum += balance;

                let listed = owners.iter().filter(|owner| owner == account).count();
                assert_eq!(
                    listed,
                    usize::from(balance > 0),
                    "holder index disagrees with balance of token {id}"
                );
            }
            assert!(
                owners.iter().all(|owner| accounts.contains(&owner)),
                "holder index lists an untracked account"
            );
            assert_eq!(client.total_supply(&id), sum, "supply drifted for token {id}");
        }
        assert_eq!(client.total_supply(&2), 0);
        assert_eq!(client.get_owners_of_token_id_length(&2), 0);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `ops` in order, checking invariants after each one. Returns the
/// number of accepted ops.
pub fn run(ops: &[Op]) -> usize {
    let world = World::new();
    let mut accepted = 0;
    for op in ops {
        let before = world.snapshot();
        if world.apply(op) {
            accepted += 1;
        } else {
            assert_eq!(before, world.snapshot(), "rejected {op:?} changed balances");
        }
        world.check_invariants();
    }
    accepted
}
