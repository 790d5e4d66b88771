use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–3) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NoAdmins = 3,

    // --- Authorization (4–5) ---
    Unauthorized = 4,
    NotApprovedOrOwner = 5,

    // --- Issuance (6–7) ---
    InvalidDestination = 6,
    AmountTooLarge = 7,

    // --- Transfer policy (8–11) ---
    SoulboundToken = 8,
    BurnerCannotSend = 9,
    DestinationMustBeBurner = 10,
    UseDistributeFunction = 11,

    // --- Input validation (12–15) ---
    InvalidAmount = 12,
    UnknownToken = 13,
    LengthMismatch = 14,
    SelfApproval = 15,

    // --- Ledger (16–18) ---
    InsufficientBalance = 16,
    Overflow = 17,
    Reentrant = 18,
}

impl Error {
    pub fn from_code(code: u32) -> Option<Error> {
        let error = match code {
            1 => Error::AlreadyInitialized,
            2 => Error::NotInitialized,
            3 => Error::NoAdmins,
            4 => Error::Unauthorized,
            5 => Error::NotApprovedOrOwner,
            6 => Error::InvalidDestination,
            7 => Error::AmountTooLarge,
            8 => Error::SoulboundToken,
            9 => Error::BurnerCannotSend,
            10 => Error::DestinationMustBeBurner,
            11 => Error::UseDistributeFunction,
            12 => Error::InvalidAmount,
            13 => Error::UnknownToken,
            14 => Error::LengthMismatch,
            15 => Error::SelfApproval,
            16 => Error::InsufficientBalance,
            17 => Error::Overflow,
            18 => Error::Reentrant,
            _ => return None,
        };
        Some(error)
    }
}

/// Human-readable reason surfaced to callers alongside an error code.
pub fn reason(error: Error) -> &'static str {
    match error {
        Error::AlreadyInitialized => "Contract is already initialized!",
        Error::NotInitialized => "Contract is not initialized!",
        Error::NoAdmins => "At least one admin is required!",
        Error::Unauthorized => "AccessControl: account is missing role",
        Error::NotApprovedOrOwner => "ERC1155: caller is not token owner nor approved",
        Error::InvalidDestination => "Minter can only mint tokens to distributors!",
        Error::AmountTooLarge => "Cannot mint that many tokens in a single transaction!",
        Error::SoulboundToken => "Can only send a redeemable token!",
        Error::BurnerCannotSend => "Burners cannot send tokens!",
        Error::DestinationMustBeBurner => "Can only send Redeemable Tokens to burners!",
        Error::UseDistributeFunction => {
            "Distributors can only send tokens in pairs through the distribute function!"
        }
        Error::InvalidAmount => "Amount must be positive!",
        Error::UnknownToken => "Unknown token id!",
        Error::LengthMismatch => "ERC1155: ids and amounts length mismatch",
        Error::SelfApproval => "ERC1155: setting approval status for self",
        Error::InsufficientBalance => "ERC1155: insufficient balance for transfer",
        Error::Overflow => "Balance overflow!",
        Error::Reentrant => "ReentrancyGuard: reentrant call",
    }
}
