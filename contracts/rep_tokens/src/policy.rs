//! Transfer policy for holder-initiated transfers.
//!
//! Rules, first match wins:
//!
//! | Condition                                        | Result                    |
//! |--------------------------------------------------|---------------------------|
//! | token is soulbound                               | `SoulboundToken`          |
//! | operator or `from` is a burner                   | `BurnerCannotSend`        |
//! | token is redeemable and `to` is not a burner     | `DestinationMustBeBurner` |
//! | operator or `from` is a distributor              | `UseDistributeFunction`   |
//!
//! Distributor issuance and soulbound requests have their own entry points and
//! never pass through here.

use soroban_sdk::Address;

use crate::errors::Error;
use crate::roles::RoleRegistry;
use crate::types::{Role, TokenClass};

pub fn check_transfer<R: RoleRegistry>(
    roles: &R,
    operator: &Address,
    from: &Address,
    to: &Address,
    id: u32,
) -> Result<(), Error> {
    let class = TokenClass::of(id).ok_or(Error::UnknownToken)?;

    if class == TokenClass::Soulbound {
        return Err(Error::SoulboundToken);
    }
    if roles.has(Role::Burner, operator) || roles.has(Role::Burner, from) {
        return Err(Error::BurnerCannotSend);
    }
    if class == TokenClass::Redeemable && !roles.has(Role::Burner, to) {
        return Err(Error::DestinationMustBeBurner);
    }
    if roles.has(Role::Distributor, operator) || roles.has(Role::Distributor, from) {
        return Err(Error::UseDistributeFunction);
    }
    Ok(())
}
