use soroban_sdk::{contracttype, Address};

// ==================== Token IDs ====================

/// Lifetime reputation. Never leaves a holder except through a soulbound request.
pub const SOULBOUND_TOKEN_ID: u32 = 0;
/// Spendable reputation. Ends its life at a burner.
pub const REDEEMABLE_TOKEN_ID: u32 = 1;

/// Every minted unit is issued as one token of each ID, in this order.
pub const TOKEN_IDS: [u32; 2] = [SOULBOUND_TOKEN_ID, REDEEMABLE_TOKEN_ID];

// ==================== TTL ====================

pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const BUMP_THRESHOLD: u32 = 14 * DAY_IN_LEDGERS;
pub const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

// ==================== Roles ====================

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    Minter = 1,
    Distributor = 2,
    Burner = 3,
    SoulboundTransferer = 4,
}

// ==================== Token classes ====================

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenClass {
    Soulbound,
    Redeemable,
}

impl TokenClass {
    pub fn of(id: u32) -> Option<Self> {
        match id {
            SOULBOUND_TOKEN_ID => Some(TokenClass::Soulbound),
            REDEEMABLE_TOKEN_ID => Some(TokenClass::Redeemable),
            _ => None,
        }
    }
}

// ==================== Config ====================

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Config {
    /// Hard ceiling on the amount a single `mint` call may issue.
    pub max_mint_per_tx: i128,
}

// ==================== Storage Keys ====================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // Instance storage
    Config,

    // Persistent storage
    RoleMember(Role, Address),  // bool
    Balance(Address, u32),      // i128, absent when zero
    Supply(u32),                // i128
    Approval(Address, Address), // (owner, operator) -> bool
    HolderCount(u32),           // u32, absent when zero
    HolderAt(u32, u32),         // (id, slot) -> Address
    HolderPos(u32, Address),    // (id, holder) -> slot

    // Temporary storage
    Lock,
}
