//! Role registry: which addresses hold which [`Role`].
//!
//! Membership lives in persistent storage under `DataKey::RoleMember`. Every
//! role, `Admin` included, is administered by `Admin`.

use soroban_sdk::{log, Address, Env};

use crate::errors::Error;
use crate::types::{DataKey, Role, BUMP_AMOUNT, BUMP_THRESHOLD};

/// Read side of the registry. The transfer policy only needs this.
pub trait RoleRegistry {
    fn has(&self, role: Role, account: &Address) -> bool;
}

/// Registry backed by the contract's persistent storage.
pub struct StoredRoles<'a> {
    env: &'a Env,
}

impl<'a> StoredRoles<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl RoleRegistry for StoredRoles<'_> {
    fn has(&self, role: Role, account: &Address) -> bool {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::RoleMember(role, account.clone()))
            .unwrap_or(false)
    }
}

pub fn role_admin(_role: Role) -> Role {
    Role::Admin
}

pub fn require<R: RoleRegistry>(
    env: &Env,
    roles: &R,
    role: Role,
    account: &Address,
) -> Result<(), Error> {
    if roles.has(role, account) {
        return Ok(());
    }
    log!(
        env,
        "AccessControl: account {} is missing role {}",
        account.clone(),
        role as u32
    );
    Err(Error::Unauthorized)
}

/// Returns `true` when membership changed.
pub fn grant(env: &Env, role: Role, account: &Address) -> bool {
    if StoredRoles::new(env).has(role, account) {
        return false;
    }
    let key = DataKey::RoleMember(role, account.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_AMOUNT);
    true
}

/// Returns `true` when membership changed.
pub fn revoke(env: &Env, role: Role, account: &Address) -> bool {
    if !StoredRoles::new(env).has(role, account) {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&DataKey::RoleMember(role, account.clone()));
    true
}
