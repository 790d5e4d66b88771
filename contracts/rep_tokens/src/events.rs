use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::types::Role;

// ==================== Event Payload Structs ====================
// Indexers subscribe via topic pattern (symbol_short!("REP"), symbol_short!("…")).

const TOPIC: Symbol = symbol_short!("REP");

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct InitializedEvent {
    pub admins: Vec<Address>,
    pub max_mint_per_tx: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}

/// `from` is `None` on mint, `to` is `None` on burn.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TransferEvent {
    pub operator: Address,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub id: u32,
    pub amount: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ApprovalEvent {
    pub owner: Address,
    pub operator: Address,
    pub approved: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SoulboundMovedEvent {
    pub transferer: Address,
    pub from: Address,
    pub to: Address,
    pub soulbound_amount: i128,
    pub redeemable_amount: i128,
}

// ==================== Emit Functions ====================

pub fn emit_initialized(env: &Env, admins: Vec<Address>, max_mint_per_tx: i128) {
    env.events().publish(
        (TOPIC, symbol_short!("INIT")),
        InitializedEvent {
            admins,
            max_mint_per_tx,
        },
    );
}

pub fn emit_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (TOPIC, symbol_short!("ROLE_GRT")),
        RoleChangedEvent {
            role,
            account,
            sender,
        },
    );
}

pub fn emit_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (TOPIC, symbol_short!("ROLE_REV")),
        RoleChangedEvent {
            role,
            account,
            sender,
        },
    );
}

pub fn emit_transfer(
    env: &Env,
    operator: Address,
    from: Option<Address>,
    to: Option<Address>,
    id: u32,
    amount: i128,
) {
    env.events().publish(
        (TOPIC, symbol_short!("TRANSFER")),
        TransferEvent {
            operator,
            from,
            to,
            id,
            amount,
        },
    );
}

pub fn emit_approval(env: &Env, owner: Address, operator: Address, approved: bool) {
    env.events().publish(
        (TOPIC, symbol_short!("APPROVAL")),
        ApprovalEvent {
            owner,
            operator,
            approved,
        },
    );
}

pub fn emit_soulbound_moved(
    env: &Env,
    transferer: Address,
    from: Address,
    to: Address,
    soulbound_amount: i128,
    redeemable_amount: i128,
) {
    env.events().publish(
        (TOPIC, symbol_short!("SB_MOVE")),
        SoulboundMovedEvent {
            transferer,
            from,
            to,
            soulbound_amount,
            redeemable_amount,
        },
    );
}
