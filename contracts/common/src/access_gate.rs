//! Pluggable authorization for configuration mutations.
//!
//! Contracts describe their privileged operations as an action type and ask an
//! [`AccessGate`] whether a caller may perform one. The gate is a type
//! parameter, so a contract can swap the tier-backed default for any other
//! scheme without touching its core logic.

use soroban_sdk::{Address, Env};

use crate::admin_tiers::{self, AdminTier};

/// Capability check consulted before a privileged action runs.
///
/// Implementations must not mutate state. Authentication of `caller`
/// (`require_auth`) is the contract's job, not the gate's.
pub trait AccessGate<A> {
    fn is_authorized(env: &Env, caller: &Address, action: &A) -> bool;
}

/// An action that can be authorized by admin tier.
pub trait TieredAction {
    fn required_tier(&self) -> AdminTier;
}

/// Gate backed by [`admin_tiers`]: a caller may perform an action when it
/// holds the action's required tier or a higher one.
pub struct TieredGate;

impl<A: TieredAction> AccessGate<A> for TieredGate {
    fn is_authorized(env: &Env, caller: &Address, action: &A) -> bool {
        admin_tiers::require_tier(env, caller, &action.required_tier())
    }
}

/// Gate that refuses everything. Useful for freezing configuration.
pub struct DenyAll;

impl<A> AccessGate<A> for DenyAll {
    fn is_authorized(_env: &Env, _caller: &Address, _action: &A) -> bool {
        false
    }
}
