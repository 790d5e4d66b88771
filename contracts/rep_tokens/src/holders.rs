//! Per-token-ID index of current holders.
//!
//! Every holder owns one slot. `HolderAt(id, slot)` names the holder,
//! `HolderPos(id, holder)` points back at the slot and `HolderCount(id)` is
//! the number of occupied slots. Appending writes three entries no matter how
//! many holders exist; removal rewrites only the slots after the removed one.

use soroban_sdk::{Address, Env, Vec};

use crate::types::{DataKey, BUMP_AMOUNT, BUMP_THRESHOLD};

pub fn len(env: &Env, id: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::HolderCount(id))
        .unwrap_or(0)
}

pub fn position(env: &Env, id: u32, account: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::HolderPos(id, account.clone()))
}

pub fn contains(env: &Env, id: u32, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::HolderPos(id, account.clone()))
}

pub fn at(env: &Env, id: u32, slot: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::HolderAt(id, slot))
}

/// Holders of `id` in slot order.
pub fn owners(env: &Env, id: u32) -> Vec<Address> {
    let mut owners = Vec::new(env);
    for slot in 0..len(env, id) {
        if let Some(owner) = at(env, id, slot) {
            owners.push_back(owner);
        }
    }
    owners
}

fn set_len(env: &Env, id: u32, count: u32) {
    let key = DataKey::HolderCount(id);
    if count == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &count);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

fn write_slot(env: &Env, id: u32, slot: u32, account: &Address) {
    let storage = env.storage().persistent();
    let at_key = DataKey::HolderAt(id, slot);
    let pos_key = DataKey::HolderPos(id, account.clone());
    storage.set(&at_key, account);
    storage.set(&pos_key, &slot);
    storage.extend_ttl(&at_key, BUMP_THRESHOLD, BUMP_AMOUNT);
    storage.extend_ttl(&pos_key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

/// Appends `account`. Returns `false` if it was already listed.
pub fn insert(env: &Env, id: u32, account: &Address) -> bool {
    if contains(env, id, account) {
        return false;
    }
    let count = len(env, id);
    write_slot(env, id, count, account);
    set_len(env, id, count + 1);
    true
}

/// Removes `account`, shifting later holders down one slot so the remaining
/// order is unchanged. Returns `false` if it was not listed.
pub fn remove(env: &Env, id: u32, account: &Address) -> bool {
    let Some(slot) = position(env, id, account) else {
        return false;
    };
    let count = len(env, id);
    for next in slot + 1..count {
        if let Some(holder) = at(env, id, next) {
            write_slot(env, id, next - 1, &holder);
        }
    }

    let storage = env.storage().persistent();
    storage.remove(&DataKey::HolderAt(id, count - 1));
    storage.remove(&DataKey::HolderPos(id, account.clone()));
    set_len(env, id, count - 1);
    true
}

#[cfg(test)]
mod test {
    use super::{at, contains, insert, len, owners, position, remove};
    use crate::RepTokens;
    use soroban_sdk::{testutils::Address as _, vec, Address, Env};

    #[test]
    fn test_insert_ignores_duplicates() {
        let env = Env::default();
        let contract_id = env.register_contract(None, RepTokens);
        let a = Address::generate(&env);

        env.as_contract(&contract_id, || {
            assert!(insert(&env, 1, &a));
            assert!(!insert(&env, 1, &a));
            assert_eq!(len(&env, 1), 1);
            assert_eq!(len(&env, 0), 0);
        });
    }

    #[test]
    fn test_remove_keeps_order_and_positions() {
        let env = Env::default();
        let contract_id = env.register_contract(None, RepTokens);
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let c = Address::generate(&env);
        let d = Address::generate(&env);

        env.as_contract(&contract_id, || {
            for owner in [&a, &b, &c, &d] {
                insert(&env, 1, owner);
            }

            assert!(remove(&env, 1, &b));

            assert_eq!(owners(&env, 1), vec![&env, a.clone(), c.clone(), d.clone()]);
            assert_eq!(position(&env, 1, &a), Some(0));
            assert_eq!(position(&env, 1, &c), Some(1));
            assert_eq!(position(&env, 1, &d), Some(2));
            assert!(!contains(&env, 1, &b));
            assert_eq!(at(&env, 1, 3), None);
        });
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let env = Env::default();
        let contract_id = env.register_contract(None, RepTokens);
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        env.as_contract(&contract_id, || {
            insert(&env, 1, &a);

            assert!(!remove(&env, 1, &b));
            assert_eq!(owners(&env, 1), vec![&env, a.clone()]);
        });
    }

    #[test]
    fn test_readd_after_remove_appends() {
        let env = Env::default();
        let contract_id = env.register_contract(None, RepTokens);
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        env.as_contract(&contract_id, || {
            insert(&env, 1, &a);
            insert(&env, 1, &b);

            remove(&env, 1, &a);
            insert(&env, 1, &a);

            assert_eq!(owners(&env, 1), vec![&env, b.clone(), a.clone()]);
            assert_eq!(position(&env, 1, &a), Some(1));
        });
    }

    #[test]
    fn test_removing_last_holder_empties_index() {
        let env = Env::default();
        let contract_id = env.register_contract(None, RepTokens);
        let a = Address::generate(&env);

        env.as_contract(&contract_id, || {
            insert(&env, 0, &a);
            assert!(remove(&env, 0, &a));

            assert_eq!(len(&env, 0), 0);
            assert_eq!(at(&env, 0, 0), None);
            assert_eq!(position(&env, 0, &a), None);
            assert_eq!(owners(&env, 0).len(), 0);
        });
    }

    #[test]
    fn test_insert_cost_is_flat() {
        let env = Env::default();
        let contract_id = env.register_contract(None, RepTokens);
        env.budget().reset_unlimited();

        env.as_contract(&contract_id, || {
            let insert_fresh = || {
                let holder = Address::generate(&env);
                env.budget().reset_tracker();
                insert(&env, 1, &holder);
                env.budget().cpu_instruction_cost()
            };

            let early = insert_fresh();
            for _ in 0..100 {
                insert_fresh();
            }
            let late = insert_fresh();

            assert_eq!(len(&env, 1), 102);
            assert!(late < early * 2, "insert cost grew from {early} to {late}");
        });
    }
}
