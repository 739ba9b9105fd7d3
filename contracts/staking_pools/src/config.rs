use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

/// Whether a pool's `lock_duration` blocks unstaking.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockPolicy {
    /// `lock_duration` is published but not checked.
    Informational,
    /// Unstaking fails with `StakeLocked` until `lock_duration` blocks have
    /// passed since the position's last deposit.
    Enforced,
}

/// User-facing operations an operator can pause.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Claim,
    Unstake,
}

/// Contract-wide emission and policy settings.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalConfig {
    /// Token paid out as rewards.
    pub reward_token: Address,
    /// Token contract standing in for the native asset (`StakeAsset::Native`).
    pub native_asset: Address,
    /// Reward units emitted per block across all pools.
    pub reward_per_block: i128,
    /// First block that earns rewards.
    pub start_block: u32,
    /// First block that no longer earns rewards, if emission is bounded.
    pub end_block: Option<u32>,
    pub lock_policy: LockPolicy,
    pub claims_paused: bool,
    pub unstakes_paused: bool,
}

impl GlobalConfig {
    pub fn is_paused(&self, operation: Operation) -> bool {
        match operation {
            Operation::Claim => self.claims_paused,
            Operation::Unstake => self.unstakes_paused,
        }
    }

    pub fn set_paused(&mut self, operation: Operation, paused: bool) {
        match operation {
            Operation::Claim => self.claims_paused = paused,
            Operation::Unstake => self.unstakes_paused = paused,
        }
    }
}

/// Rejects a reward window whose end does not come after its start.
pub fn validate_window(start_block: u32, end_block: Option<u32>) -> Result<(), ContractError> {
    match end_block {
        Some(end) if end <= start_block => Err(ContractError::InvalidConfig),
        _ => Ok(()),
    }
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<GlobalConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &GlobalConfig) {
    env.storage().instance().set(&CONFIG, config);
}
