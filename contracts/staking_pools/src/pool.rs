use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, U256};

use crate::config::GlobalConfig;
use crate::{ContractError, TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WT");

/// The asset a pool accepts as stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakeAsset {
    /// The chain's native asset, resolved through `GlobalConfig::native_asset`.
    Native,
    Token(Address),
}

impl StakeAsset {
    /// Token contract to move funds through.
    pub fn resolve(&self, config: &GlobalConfig) -> Address {
        match self {
            StakeAsset::Native => config.native_asset.clone(),
            StakeAsset::Token(address) => address.clone(),
        }
    }
}

/// A staking bucket and its accrual state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub stake_asset: StakeAsset,
    /// Relative share of the global emission.
    pub weight: u64,
    /// Smallest non-zero amount a single deposit may carry.
    pub min_deposit: i128,
    /// Blocks a deposit stays locked when the lock policy is enforced.
    pub lock_duration: u32,
    /// Sum of every position's `amount` in this pool.
    pub total_staked: i128,
    /// Reward per unit of stake since creation, scaled by `rewards::SCALE`.
    pub acc_reward_per_share: U256,
    /// Block up to which `acc_reward_per_share` is current.
    pub last_reward_block: u32,
}

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn set_total_weight(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_WEIGHT, &total);
}

/// Recomputes the total weight after one pool moves from `old` to `new`.
pub fn reweigh(total: u64, old: u64, new: u64) -> Result<u64, ContractError> {
    total
        .checked_sub(old)
        .and_then(|rest| rest.checked_add(new))
        .ok_or(ContractError::InvalidWeight)
}

pub fn load(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    if pool_id >= pool_count(env) {
        return Err(ContractError::PoolNotFound);
    }
    env.storage()
        .persistent()
        .get(&pool_key(pool_id))
        .ok_or(ContractError::PoolNotFound)
}

pub fn store(env: &Env, pool_id: u32, pool: &Pool) {
    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Appends `pool` to the registry and returns its id.
pub fn append(env: &Env, pool: &Pool) -> u32 {
    let pool_id = pool_count(env);
    store(env, pool_id, pool);
    env.storage().instance().set(&POOL_COUNT, &(pool_id + 1));
    pool_id
}
