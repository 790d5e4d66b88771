//! Balances, total supply and operator approvals.
//!
//! Mutations go through [`Pending`]: every debit and credit of a call is
//! staged and checked against the working copy, and nothing reaches storage
//! until [`Pending::commit`]. Commit is also where the holder index learns
//! about 0 → positive and positive → 0 transitions.

use soroban_sdk::{Address, Env, Map};

use crate::errors::Error;
use crate::holders;
use crate::types::{DataKey, BUMP_AMOUNT, BUMP_THRESHOLD};

pub fn balance(env: &Env, account: &Address, id: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone(), id))
        .unwrap_or(0)
}

fn write_balance(env: &Env, account: &Address, id: u32, amount: i128) {
    let key = DataKey::Balance(account.clone(), id);
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

pub fn total_supply(env: &Env, id: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Supply(id))
        .unwrap_or(0)
}

fn write_supply(env: &Env, id: u32, amount: i128) {
    let key = DataKey::Supply(id);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

// ------ Approvals ------

pub fn is_approved_for_all(env: &Env, owner: &Address, operator: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Approval(owner.clone(), operator.clone()))
        .unwrap_or(false)
}

pub fn set_approval_for_all(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    let key = DataKey::Approval(owner.clone(), operator.clone());
    if !approved {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

pub fn is_owner_or_approved(env: &Env, operator: &Address, owner: &Address) -> bool {
    operator == owner || is_approved_for_all(env, owner, operator)
}

// ------ Staged mutations ------

pub struct Pending<'a> {
    env: &'a Env,
    balances: Map<(Address, u32), i128>,
    supplies: Map<u32, i128>,
}

impl<'a> Pending<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            balances: Map::new(env),
            supplies: Map::new(env),
        }
    }

    pub fn balance(&self, account: &Address, id: u32) -> i128 {
        self.balances
            .get((account.clone(), id))
            .unwrap_or_else(|| balance(self.env, account, id))
    }

    fn supply(&self, id: u32) -> i128 {
        self.supplies
            .get(id)
            .unwrap_or_else(|| total_supply(self.env, id))
    }

    fn credit(&mut self, account: &Address, id: u32, amount: i128) -> Result<(), Error> {
        let updated = self
            .balance(account, id)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        self.balances.set((account.clone(), id), updated);
        Ok(())
    }

    fn debit(&mut self, account: &Address, id: u32, amount: i128) -> Result<(), Error> {
        let current = self.balance(account, id);
        if current < amount {
            return Err(Error::InsufficientBalance);
        }
        self.balances.set((account.clone(), id), current - amount);
        Ok(())
    }

    pub fn mint(&mut self, to: &Address, id: u32, amount: i128) -> Result<(), Error> {
        let supply = self.supply(id).checked_add(amount).ok_or(Error::Overflow)?;
        self.credit(to, id, amount)?;
        self.supplies.set(id, supply);
        Ok(())
    }

    pub fn burn(&mut self, from: &Address, id: u32, amount: i128) -> Result<(), Error> {
        self.debit(from, id, amount)?;
        let supply = self.supply(id) - amount;
        self.supplies.set(id, supply);
        Ok(())
    }

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        id: u32,
        amount: i128,
    ) -> Result<(), Error> {
        self.debit(from, id, amount)?;
        self.credit(to, id, amount)
    }

    /// Writes every staged balance and supply, then syncs the holder index.
    pub fn commit(self) {
        for ((account, id), updated) in self.balances.iter() {
            let previous = balance(self.env, &account, id);
            if previous == updated {
                continue;
            }
            write_balance(self.env, &account, id, updated);
            if previous == 0 {
                holders::insert(self.env, id, &account);
            } else if updated == 0 {
                holders::remove(self.env, id, &account);
            }
        }
        for (id, supply) in self.supplies.iter() {
            write_supply(self.env, id, supply);
        }
    }
}
