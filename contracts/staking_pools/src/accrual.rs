//! Block-driven settlement of pool accumulators.
//!
//! [`project`] is the single source of truth for how a pool advances; both the
//! mutating [`settle`] path and the read-only pending-reward views go through
//! it, so previews always match what a real settlement would pay.

use soroban_sdk::Env;

use crate::config::GlobalConfig;
use crate::events;
use crate::pool::{self, Pool};
use crate::rewards::{self, AccPerShare};
use crate::ContractError;

/// The state `pool` would have after settling up to `block`.
///
/// Blocks at or before `last_reward_block` leave the pool untouched.
pub fn project(
    env: &Env,
    pool: &Pool,
    config: &GlobalConfig,
    total_weight: u64,
    block: u32,
) -> Result<Pool, ContractError> {
    let mut next = pool.clone();
    if block <= pool.last_reward_block {
        return Ok(next);
    }

    if pool.total_staked > 0 {
        let blocks = rewards::reward_blocks(
            pool.last_reward_block,
            block,
            config.start_block,
            config.end_block,
        );
        let emission = rewards::pool_emission(
            env,
            blocks,
            config.reward_per_block,
            pool.weight,
            total_weight,
        )
        .ok_or(ContractError::ArithmeticOverflow)?;
        next.acc_reward_per_share = AccPerShare::from_raw(pool.acc_reward_per_share.clone())
            .accrue(env, &emission, pool.total_staked)
            .raw();
    }

    next.last_reward_block = block;
    Ok(next)
}

/// Brings `pool_id` current to the ledger sequence and persists it.
pub fn settle(env: &Env, config: &GlobalConfig, pool_id: u32) -> Result<Pool, ContractError> {
    let current = pool::load(env, pool_id)?;
    let block = env.ledger().sequence();
    if block <= current.last_reward_block {
        return Ok(current);
    }

    let settled = project(env, &current, config, pool::total_weight(env), block)?;
    pool::store(env, pool_id, &settled);
    events::publish_pool_settled(
        env,
        pool_id,
        settled.acc_reward_per_share.clone(),
        settled.last_reward_block,
    );
    Ok(settled)
}

/// Settles every pool. Run before anything that changes how emission is
/// split, so the change never reaches back into past blocks.
pub fn settle_all(env: &Env, config: &GlobalConfig) -> Result<(), ContractError> {
    for pool_id in 0..pool::pool_count(env) {
        settle(env, config, pool_id)?;
    }
    Ok(())
}
