use common::{AccessGate, AdminTier, TieredAction, TieredGate};
use soroban_sdk::{Address, Env};

use crate::ContractError;

/// Gate consulted by every configuration entry point.
pub type Gate = TieredGate;

/// Privileged configuration changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigAction {
    AddPool,
    SetPoolWeight,
    UpdatePool,
    SetEmission,
    SetLockPolicy,
    Pause,
}

impl TieredAction for ConfigAction {
    fn required_tier(&self) -> AdminTier {
        match self {
            ConfigAction::Pause => AdminTier::OperatorAdmin,
            ConfigAction::AddPool
            | ConfigAction::SetPoolWeight
            | ConfigAction::UpdatePool
            | ConfigAction::SetEmission
            | ConfigAction::SetLockPolicy => AdminTier::ContractAdmin,
        }
    }
}

/// Authenticates `caller` and checks it against gate `G`.
pub fn authorize<G: AccessGate<ConfigAction>>(
    env: &Env,
    caller: &Address,
    action: ConfigAction,
) -> Result<(), ContractError> {
    caller.require_auth();
    check::<G>(env, caller, action)
}

fn check<G: AccessGate<ConfigAction>>(
    env: &Env,
    caller: &Address,
    action: ConfigAction,
) -> Result<(), ContractError> {
    if G::is_authorized(env, caller, &action) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}
