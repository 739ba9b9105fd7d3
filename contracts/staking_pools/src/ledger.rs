use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, U256};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

const USER_STAKE: Symbol = symbol_short!("USR_STK");

/// One user's position in one pool.
///
/// A fresh (never-deposited) position reads back as all zeros.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub amount: i128,
    /// `amount × acc_reward_per_share / SCALE` at the last settlement.
    pub reward_debt: U256,
    /// Settled rewards waiting to be transferred.
    pub pending_rewards: i128,
    /// Block of the most recent non-zero deposit.
    pub last_deposit_block: u32,
}

fn stake_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (USER_STAKE, pool_id, user.clone())
}

pub fn load(env: &Env, pool_id: u32, user: &Address) -> UserStake {
    env.storage()
        .persistent()
        .get(&stake_key(pool_id, user))
        .unwrap_or_else(|| UserStake {
            amount: 0,
            reward_debt: U256::from_u32(env, 0),
            pending_rewards: 0,
            last_deposit_block: 0,
        })
}

pub fn store(env: &Env, pool_id: u32, user: &Address, stake: &UserStake) {
    let key = stake_key(pool_id, user);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
