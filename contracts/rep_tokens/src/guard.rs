use soroban_sdk::Env;

use crate::errors::Error;
use crate::types::DataKey;

/// Runs `f` with the per-call lock held. A nested entry sees the lock and
/// fails with `Reentrant`. On error the host discards the lock together with
/// every other write of the call.
pub fn critical_section<T>(
    env: &Env,
    f: impl FnOnce() -> Result<T, Error>,
) -> Result<T, Error> {
    if env.storage().temporary().has(&DataKey::Lock) {
        return Err(Error::Reentrant);
    }
    env.storage().temporary().set(&DataKey::Lock, &true);
    let result = f();
    env.storage().temporary().remove(&DataKey::Lock);
    result
}
