#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, U256};

use common::AdminTier;

use crate::config::{LockPolicy, Operation};
use crate::pool::StakeAsset;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub reward_per_block: i128,
    pub start_block: u32,
    pub end_block: Option<u32>,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub stake_asset: StakeAsset,
    pub weight: u64,
    pub min_deposit: i128,
    pub lock_duration: u32,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool_id: u32,
    pub weight: u64,
    pub total_weight: u64,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub min_deposit: i128,
    pub lock_duration: u32,
    pub block: u32,
}

/// Fired whenever a pool's accumulator is brought forward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSettledEvent {
    pub pool_id: u32,
    pub acc_reward_per_share: U256,
    pub last_reward_block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub block: u32,
}

/// Fired when rewards are transferred to a user.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when settled rewards are kept back because claims are paused.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStashedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub stashed_total: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPerBlockSetEvent {
    pub reward_per_block: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWindowSetEvent {
    pub start_block: u32,
    pub end_block: Option<u32>,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockPolicySetEvent {
    pub policy: LockPolicy,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseSetEvent {
    pub operation: Operation,
    pub paused: bool,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminPromotedEvent {
    pub caller: Address,
    pub admin: Address,
    pub tier: AdminTier,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminDemotedEvent {
    pub caller: Address,
    pub admin: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    reward_per_block: i128,
    start_block: u32,
    end_block: Option<u32>,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            reward_per_block,
            start_block,
            end_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    stake_asset: StakeAsset,
    weight: u64,
    min_deposit: i128,
    lock_duration: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            stake_asset,
            weight,
            min_deposit,
            lock_duration,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_weight_set(env: &Env, pool_id: u32, weight: u64, total_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_WT"), pool_id),
        PoolWeightSetEvent {
            pool_id,
            weight,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, pool_id: u32, min_deposit: i128, lock_duration: u32) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            min_deposit,
            lock_duration,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_settled(
    env: &Env,
    pool_id: u32,
    acc_reward_per_share: U256,
    last_reward_block: u32,
) {
    env.events().publish(
        (symbol_short!("SETTLED"), pool_id),
        PoolSettledEvent {
            pool_id,
            acc_reward_per_share,
            last_reward_block,
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, user.clone()),
        DepositedEvent {
            pool_id,
            user,
            amount,
            new_total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), pool_id, user.clone()),
        UnstakedEvent {
            pool_id,
            user,
            amount,
            new_total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, pool_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), pool_id, user.clone()),
        RewardClaimedEvent {
            pool_id,
            user,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_stashed(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    stashed_total: i128,
) {
    env.events().publish(
        (symbol_short!("STASHED"), pool_id, user.clone()),
        RewardStashedEvent {
            pool_id,
            user,
            amount,
            stashed_total,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_per_block_set(env: &Env, reward_per_block: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardPerBlockSetEvent {
            reward_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_window_set(env: &Env, start_block: u32, end_block: Option<u32>) {
    env.events().publish(
        (symbol_short!("RWD_WIN"),),
        RewardWindowSetEvent {
            start_block,
            end_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_lock_policy_set(env: &Env, policy: LockPolicy) {
    env.events().publish(
        (symbol_short!("LOCK_SET"),),
        LockPolicySetEvent {
            policy,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pause_set(env: &Env, operation: Operation, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE"),),
        PauseSetEvent {
            operation,
            paused,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_promoted(env: &Env, caller: Address, admin: Address, tier: AdminTier) {
    env.events().publish(
        (symbol_short!("ADM_PROM"), admin.clone()),
        AdminPromotedEvent {
            caller,
            admin,
            tier,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_demoted(env: &Env, caller: Address, admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_DEM"), admin.clone()),
        AdminDemotedEvent {
            caller,
            admin,
            block: env.ledger().sequence(),
        },
    );
}
