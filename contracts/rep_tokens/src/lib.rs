//! # RepTokens
//!
//! A two-token reputation ledger with role-gated movement:
//!
//! | Token | ID | Moves by |
//! |-------|----|----------|
//! | Soulbound ("lifetime") | 0 | `distribute`, then only `fulfill_soulbound_transfer` |
//! | Redeemable | 1 | `distribute`, then holder → burner via `safe_transfer_from` |
//!
//! Minters issue both tokens in pairs to distributors, distributors hand them
//! out, holders redeem the redeemable half at burners. For each token ID the
//! contract keeps an ordered index of every address with a positive balance.

#![no_std]

use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Bytes, Env, String, Vec};

mod errors;
mod events;
mod guard;
mod holders;
mod ledger;
mod policy;
mod roles;
mod types;


pub use errors::{reason, Error};
pub use events::{
    ApprovalEvent, InitializedEvent, RoleChangedEvent, SoulboundMovedEvent, TransferEvent,
};
pub use roles::RoleRegistry;
pub use types::{
    Config, Role, TokenClass, REDEEMABLE_TOKEN_ID, SOULBOUND_TOKEN_ID, TOKEN_IDS,
};

use ledger::Pending;
use roles::StoredRoles;
use types::{DataKey, BUMP_AMOUNT, BUMP_THRESHOLD};

contractmeta!(
    key = "Description",
    val = "RepTokens - role-gated soulbound and redeemable reputation tokens"
);

#[contract]
pub struct RepTokens;

#[contractimpl]
impl RepTokens {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Grants `Admin` to every address in `admins` and fixes the per-call
    /// mint cap. Must be called exactly once.
    pub fn initialize(
        env: Env,
        admins: Vec<Address>,
        max_mint_per_tx: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        if admins.is_empty() {
            return Err(Error::NoAdmins);
        }
        if max_mint_per_tx <= 0 {
            return Err(Error::InvalidAmount);
        }
        for admin in admins.iter() {
            admin.require_auth();
        }

        env.storage()
            .instance()
            .set(&DataKey::Config, &Config { max_mint_per_tx });
        Self::extend_instance(&env);
        for admin in admins.iter() {
            if roles::grant(&env, Role::Admin, &admin) {
                events::emit_role_granted(&env, Role::Admin, admin.clone(), admin);
            }
        }

        log!(&env, "RepTokens initialized, mint cap {}", max_mint_per_tx);
        events::emit_initialized(&env, admins, max_mint_per_tx);
        Ok(())
    }

    pub fn max_mint_per_tx(env: Env) -> Result<i128, Error> {
        Ok(Self::read_config(&env)?.max_mint_per_tx)
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    /// `caller` must hold the admin role of `role`.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            let admin_role = roles::role_admin(role);
            roles::require(&env, &StoredRoles::new(&env), admin_role, &caller)?;
            if roles::grant(&env, role, &account) {
                events::emit_role_granted(&env, role, account.clone(), caller.clone());
            }
            Ok(())
        })
    }

    /// `caller` must hold the admin role of `role`.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            let admin_role = roles::role_admin(role);
            roles::require(&env, &StoredRoles::new(&env), admin_role, &caller)?;
            if roles::revoke(&env, role, &account) {
                events::emit_role_revoked(&env, role, account.clone(), caller.clone());
            }
            Ok(())
        })
    }

    /// Drops `role` from the signing `account`.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), Error> {
        account.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            if roles::revoke(&env, role, &account) {
                events::emit_role_revoked(&env, role, account.clone(), account.clone());
            }
            Ok(())
        })
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        StoredRoles::new(&env).has(role, &account)
    }

    pub fn get_role_admin(_env: Env, role: Role) -> Role {
        roles::role_admin(role)
    }

    // ------------------------------------------------------------------
    // Issuance
    // ------------------------------------------------------------------

    /// Issues `amount` soulbound and `amount` redeemable tokens to the
    /// distributor `to`.
    pub fn mint(
        env: Env,
        minter: Address,
        to: Address,
        amount: i128,
        _data: Bytes,
    ) -> Result<(), Error> {
        minter.require_auth();
        guard::critical_section(&env, || {
            let config = Self::begin(&env)?;
            let registry = StoredRoles::new(&env);
            roles::require(&env, &registry, Role::Minter, &minter)?;
            if !registry.has(Role::Distributor, &to) {
                log!(&env, "mint rejected: {} is not a distributor", to.clone());
                return Err(Error::InvalidDestination);
            }
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }
            if amount > config.max_mint_per_tx {
                log!(
                    &env,
                    "mint rejected: {} exceeds cap {}",
                    amount,
                    config.max_mint_per_tx
                );
                return Err(Error::AmountTooLarge);
            }

            let mut pending = Pending::new(&env);
            for id in TOKEN_IDS {
                pending.mint(&to, id, amount)?;
            }
            pending.commit();

            for id in TOKEN_IDS {
                events::emit_transfer(&env, minter.clone(), None, Some(to.clone()), id, amount);
            }
            Ok(())
        })
    }

    /// Moves `amount` of both tokens from `from` to `to`. The signing
    /// `distributor` must be `from` or approved by it.
    pub fn distribute(
        env: Env,
        distributor: Address,
        from: Address,
        to: Address,
        amount: i128,
        _data: Bytes,
    ) -> Result<(), Error> {
        distributor.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            roles::require(&env, &StoredRoles::new(&env), Role::Distributor, &distributor)?;
            if !ledger::is_owner_or_approved(&env, &distributor, &from) {
                return Err(Error::NotApprovedOrOwner);
            }
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }

            let mut pending = Pending::new(&env);
            for id in TOKEN_IDS {
                pending.transfer(&from, &to, id, amount)?;
            }
            pending.commit();

            for id in TOKEN_IDS {
                events::emit_transfer(
                    &env,
                    distributor.clone(),
                    Some(from.clone()),
                    Some(to.clone()),
                    id,
                    amount,
                );
            }
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Holder transfers
    // ------------------------------------------------------------------

    pub fn safe_transfer_from(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        id: u32,
        amount: i128,
        _data: Bytes,
    ) -> Result<(), Error> {
        operator.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            if !ledger::is_owner_or_approved(&env, &operator, &from) {
                return Err(Error::NotApprovedOrOwner);
            }
            Self::check_policy(&env, &operator, &from, &to, id)?;
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }

            let mut pending = Pending::new(&env);
            pending.transfer(&from, &to, id, amount)?;
            pending.commit();

            events::emit_transfer(
                &env,
                operator.clone(),
                Some(from.clone()),
                Some(to.clone()),
                id,
                amount,
            );
            Ok(())
        })
    }

    /// Batch form of `safe_transfer_from`. Every `(id, amount)` pair is
    /// checked before any of them is applied.
    pub fn safe_batch_transfer_from(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        ids: Vec<u32>,
        amounts: Vec<i128>,
        _data: Bytes,
    ) -> Result<(), Error> {
        operator.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            if ids.len() != amounts.len() {
                return Err(Error::LengthMismatch);
            }
            if !ledger::is_owner_or_approved(&env, &operator, &from) {
                return Err(Error::NotApprovedOrOwner);
            }

            let mut pending = Pending::new(&env);
            for (id, amount) in ids.iter().zip(amounts.iter()) {
                Self::check_policy(&env, &operator, &from, &to, id)?;
                if amount <= 0 {
                    return Err(Error::InvalidAmount);
                }
                pending.transfer(&from, &to, id, amount)?;
            }
            pending.commit();

            for (id, amount) in ids.iter().zip(amounts.iter()) {
                events::emit_transfer(
                    &env,
                    operator.clone(),
                    Some(from.clone()),
                    Some(to.clone()),
                    id,
                    amount,
                );
            }
            Ok(())
        })
    }

    /// Moves the whole soulbound and redeemable balance of `from` to `to`.
    /// `transferer` needs the soulbound-transferer role and an approval from
    /// `from`. A burner is never a valid source.
    pub fn fulfill_soulbound_transfer(
        env: Env,
        transferer: Address,
        from: Address,
        to: Address,
    ) -> Result<(), Error> {
        transferer.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            let registry = StoredRoles::new(&env);
            roles::require(&env, &registry, Role::SoulboundTransferer, &transferer)?;
            if !ledger::is_approved_for_all(&env, &from, &transferer) {
                return Err(Error::NotApprovedOrOwner);
            }
            if registry.has(Role::Burner, &from) {
                log!(&env, "soulbound request rejected: {} is a burner", from.clone());
                return Err(Error::BurnerCannotSend);
            }

            let soulbound = ledger::balance(&env, &from, SOULBOUND_TOKEN_ID);
            let redeemable = ledger::balance(&env, &from, REDEEMABLE_TOKEN_ID);
            let mut pending = Pending::new(&env);
            pending.transfer(&from, &to, SOULBOUND_TOKEN_ID, soulbound)?;
            pending.transfer(&from, &to, REDEEMABLE_TOKEN_ID, redeemable)?;
            pending.commit();

            let moved = [
                (SOULBOUND_TOKEN_ID, soulbound),
                (REDEEMABLE_TOKEN_ID, redeemable),
            ];
            for (id, amount) in moved {
                if amount > 0 {
                    events::emit_transfer(
                        &env,
                        transferer.clone(),
                        Some(from.clone()),
                        Some(to.clone()),
                        id,
                        amount,
                    );
                }
            }
            events::emit_soulbound_moved(
                &env,
                transferer.clone(),
                from.clone(),
                to.clone(),
                soulbound,
                redeemable,
            );
            Ok(())
        })
    }

    /// Redeems: destroys `amount` of the burner's own redeemable tokens.
    pub fn burn(env: Env, burner: Address, amount: i128) -> Result<(), Error> {
        burner.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            roles::require(&env, &StoredRoles::new(&env), Role::Burner, &burner)?;
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }

            let mut pending = Pending::new(&env);
            pending.burn(&burner, REDEEMABLE_TOKEN_ID, amount)?;
            pending.commit();

            events::emit_transfer(
                &env,
                burner.clone(),
                Some(burner.clone()),
                None,
                REDEEMABLE_TOKEN_ID,
                amount,
            );
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Approvals
    // ------------------------------------------------------------------

    pub fn set_approval_for_all(
        env: Env,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        owner.require_auth();
        guard::critical_section(&env, || {
            Self::begin(&env)?;
            if owner == operator {
                return Err(Error::SelfApproval);
            }
            ledger::set_approval_for_all(&env, &owner, &operator, approved);
            events::emit_approval(&env, owner.clone(), operator.clone(), approved);
            Ok(())
        })
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        ledger::is_approved_for_all(&env, &owner, &operator)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn balance_of(env: Env, account: Address, id: u32) -> i128 {
        ledger::balance(&env, &account, id)
    }

    pub fn balance_of_batch(
        env: Env,
        accounts: Vec<Address>,
        ids: Vec<u32>,
    ) -> Result<Vec<i128>, Error> {
        if accounts.len() != ids.len() {
            return Err(Error::LengthMismatch);
        }
        let mut balances = Vec::new(&env);
        for (account, id) in accounts.iter().zip(ids.iter()) {
            balances.push_back(ledger::balance(&env, &account, id));
        }
        Ok(balances)
    }

    pub fn total_supply(env: Env, id: u32) -> i128 {
        ledger::total_supply(&env, id)
    }

    /// Current holders of `id` in the order they first acquired a balance.
    pub fn get_owners_of_token_id(env: Env, id: u32) -> Vec<Address> {
        holders::owners(&env, id)
    }

    pub fn get_owners_of_token_id_length(env: Env, id: u32) -> u32 {
        holders::len(&env, id)
    }

    pub fn error_reason(env: Env, code: u32) -> Option<String> {
        Error::from_code(code).map(|error| String::from_str(&env, reason(error)))
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    fn read_config(env: &Env) -> Result<Config, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    /// Entry check for every mutating call.
    fn begin(env: &Env) -> Result<Config, Error> {
        let config = Self::read_config(env)?;
        Self::extend_instance(env);
        Ok(config)
    }

    fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
    }

    fn check_policy(
        env: &Env,
        operator: &Address,
        from: &Address,
        to: &Address,
        id: u32,
    ) -> Result<(), Error> {
        policy::check_transfer(&StoredRoles::new(env), operator, from, to, id).map_err(|error| {
            log!(env, "transfer of token {} rejected: code {}", id, error as u32);
            error
        })
    }
}
