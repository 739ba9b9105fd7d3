#![no_std]

pub mod access;
pub mod accrual;
pub mod config;
pub mod events;
pub mod ledger;
pub mod pool;
pub mod rewards;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec, U256};

use access::{ConfigAction, Gate};
use config::{GlobalConfig, LockPolicy, Operation};
use ledger::UserStake;
use pool::{Pool, StakeAsset};
use rewards::AccPerShare;

pub(crate) const TTL_THRESHOLD: u32 = admin_tiers::TTL_THRESHOLD;
pub(crate) const TTL_EXTEND_TO: u32 = admin_tiers::TTL_EXTEND_TO;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PoolNotFound = 4,
    InvalidWeight = 5,
    InvalidConfig = 6,
    InvalidAmount = 7,
    BelowMinimum = 8,
    InsufficientStake = 9,
    StakeLocked = 10,
    TransferFailed = 11,
    ClaimPaused = 12,
    UnstakePaused = 13,
    ArithmeticOverflow = 14,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolsContract;

#[contractimpl]
impl StakingPoolsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `native_asset`     – token contract used for `StakeAsset::Native` pools.
    /// * `reward_token`     – token paid out as rewards; the contract must be
    ///                        funded with it separately.
    /// * `reward_per_block` – reward units emitted per block across all pools.
    /// * `start_block`      – first block that earns rewards.
    /// * `end_block`        – first block that no longer earns rewards.
    ///
    /// `admin` becomes the SuperAdmin of the tier system.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
        reward_token: Address,
        reward_per_block: i128,
        start_block: u32,
        end_block: Option<u32>,
    ) -> Result<(), ContractError> {
        if config::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block < 0 {
            return Err(ContractError::InvalidConfig);
        }
        config::validate_window(start_block, end_block)?;

        config::store(
            &env,
            &GlobalConfig {
                reward_token: reward_token.clone(),
                native_asset,
                reward_per_block,
                start_block,
                end_block,
                lock_policy: LockPolicy::Informational,
                claims_paused: false,
                unstakes_paused: false,
            },
        );
        admin_tiers::set_super_admin(&env, &admin);
        Self::bump_instance(&env);

        events::publish_initialized(
            &env,
            admin,
            reward_token,
            reward_per_block,
            start_block,
            end_block,
        );

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Append a pool and return its id.
    ///
    /// With `update_existing`, every existing pool is settled at the old
    /// weight split first. Without it, their unsettled blocks will be paid at
    /// the new split.
    pub fn add_pool(
        env: Env,
        caller: Address,
        stake_asset: StakeAsset,
        weight: u64,
        min_deposit: i128,
        lock_duration: u32,
        update_existing: bool,
    ) -> Result<u32, ContractError> {
        let config = config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::AddPool)?;

        if min_deposit < 0 || stake_asset.resolve(&config) == config.reward_token {
            return Err(ContractError::InvalidConfig);
        }
        let total_weight = pool::reweigh(pool::total_weight(&env), 0, weight)?;

        if update_existing {
            accrual::settle_all(&env, &config)?;
        }

        let pool_id = pool::append(
            &env,
            &Pool {
                stake_asset: stake_asset.clone(),
                weight,
                min_deposit,
                lock_duration,
                total_staked: 0,
                acc_reward_per_share: AccPerShare::zero(&env).raw(),
                last_reward_block: env.ledger().sequence(),
            },
        );
        pool::set_total_weight(&env, total_weight);
        Self::bump_instance(&env);

        events::publish_pool_added(&env, pool_id, stake_asset, weight, min_deposit, lock_duration);

        Ok(pool_id)
    }

    /// Change a pool's weight. The pool itself is always settled at its old
    /// weight; `update_existing` settles every other pool as well.
    pub fn set_pool_weight(
        env: Env,
        caller: Address,
        pool_id: u32,
        weight: u64,
        update_existing: bool,
    ) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::SetPoolWeight)?;

        let current = pool::load(&env, pool_id)?;
        let total_weight = pool::reweigh(pool::total_weight(&env), current.weight, weight)?;

        let mut target = if update_existing {
            accrual::settle_all(&env, &config)?;
            pool::load(&env, pool_id)?
        } else {
            accrual::settle(&env, &config, pool_id)?
        };

        target.weight = weight;
        pool::store(&env, pool_id, &target);
        pool::set_total_weight(&env, total_weight);
        Self::bump_instance(&env);

        events::publish_pool_weight_set(&env, pool_id, weight, total_weight);

        Ok(())
    }

    /// Change a pool's deposit minimum and lock duration.
    pub fn update_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        min_deposit: i128,
        lock_duration: u32,
    ) -> Result<(), ContractError> {
        config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::UpdatePool)?;

        if min_deposit < 0 {
            return Err(ContractError::InvalidConfig);
        }
        let mut target = pool::load(&env, pool_id)?;
        target.min_deposit = min_deposit;
        target.lock_duration = lock_duration;
        pool::store(&env, pool_id, &target);
        Self::bump_instance(&env);

        events::publish_pool_updated(&env, pool_id, min_deposit, lock_duration);

        Ok(())
    }

    // ── Emission & policy ───────────────────────────────────────────────────

    /// Change the global emission rate. All pools are settled at the old rate
    /// first.
    pub fn set_reward_per_block(
        env: Env,
        caller: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::SetEmission)?;

        if reward_per_block < 0 {
            return Err(ContractError::InvalidConfig);
        }
        accrual::settle_all(&env, &config)?;

        config.reward_per_block = reward_per_block;
        config::store(&env, &config);
        Self::bump_instance(&env);

        events::publish_reward_per_block_set(&env, reward_per_block);

        Ok(())
    }

    /// Move the reward window. All pools are settled under the old window
    /// first; blocks already settled are never revisited.
    pub fn set_reward_window(
        env: Env,
        caller: Address,
        start_block: u32,
        end_block: Option<u32>,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::SetEmission)?;

        config::validate_window(start_block, end_block)?;
        accrual::settle_all(&env, &config)?;

        config.start_block = start_block;
        config.end_block = end_block;
        config::store(&env, &config);
        Self::bump_instance(&env);

        events::publish_reward_window_set(&env, start_block, end_block);

        Ok(())
    }

    pub fn set_lock_policy(
        env: Env,
        caller: Address,
        policy: LockPolicy,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::SetLockPolicy)?;

        config.lock_policy = policy;
        config::store(&env, &config);
        Self::bump_instance(&env);

        events::publish_lock_policy_set(&env, policy);

        Ok(())
    }

    /// Pause or resume claims or unstakes. Requires at least `OperatorAdmin`.
    pub fn set_paused(
        env: Env,
        caller: Address,
        operation: Operation,
        paused: bool,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        access::authorize::<Gate>(&env, &caller, ConfigAction::Pause)?;

        config.set_paused(operation, paused);
        config::store(&env, &config);
        Self::bump_instance(&env);

        events::publish_pause_set(&env, operation, paused);

        Ok(())
    }

    // ── Admin tier management ───────────────────────────────────────────────

    /// Grant `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        config::load(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier.clone()) {
            return Err(ContractError::Unauthorized);
        }
        Self::bump_instance(&env);

        events::publish_admin_promoted(&env, caller, target, tier);

        Ok(())
    }

    /// Revoke every tier held by `target`. Only a `SuperAdmin` may call this,
    /// and the bootstrap admin cannot be demoted.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        config::load(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Self::bump_instance(&env);

        events::publish_admin_demoted(&env, caller, target);

        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── Settlement ──────────────────────────────────────────────────────────

    /// Bring one pool's accumulator current. Anyone may call this.
    pub fn settle_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        let config = config::load(&env)?;
        accrual::settle(&env, &config, pool_id)
    }

    /// Bring every pool's accumulator current. Anyone may call this.
    pub fn settle_all_pools(env: Env) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        accrual::settle_all(&env, &config)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's stake asset.
    ///
    /// Rewards accrued on the existing balance are paid out (or stashed while
    /// claims are paused) before the balance changes. A zero `amount` only
    /// does that harvest.
    pub fn deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        user.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Settle the pool before touching any balance.
        let mut target = accrual::settle(&env, &config, pool_id)?;
        if amount > 0 && amount < target.min_deposit {
            return Err(ContractError::BelowMinimum);
        }

        // 2. Pay out what the existing balance earned.
        let mut stake = ledger::load(&env, pool_id, &user);
        Self::harvest(&env, &config, pool_id, &user, &target, &mut stake)?;

        // 3. Pull the deposit and grow the balances.
        if amount > 0 {
            Self::transfer(
                &env,
                &target.stake_asset.resolve(&config),
                &user,
                &env.current_contract_address(),
                amount,
            )?;
            stake.amount = stake
                .amount
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            target.total_staked = target
                .total_staked
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            stake.last_deposit_block = env.ledger().sequence();
            pool::store(&env, pool_id, &target);
        }

        // 4. Re-snapshot the debt at the new balance.
        stake.reward_debt = Self::debt_for(&env, &target, stake.amount)?;
        ledger::store(&env, pool_id, &user, &stake);
        Self::bump_instance(&env);

        events::publish_deposited(&env, pool_id, user, amount, target.total_staked);

        Ok(())
    }

    /// Withdraw `amount` of stake. Pending rewards are paid out as in
    /// `deposit`. A zero `amount` only harvests.
    pub fn unstake(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        user.require_auth();

        if config.is_paused(Operation::Unstake) {
            return Err(ContractError::UnstakePaused);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut target = accrual::settle(&env, &config, pool_id)?;
        let mut stake = ledger::load(&env, pool_id, &user);
        if amount > stake.amount {
            return Err(ContractError::InsufficientStake);
        }
        if amount > 0 && config.lock_policy == LockPolicy::Enforced {
            let unlocks_at = stake
                .last_deposit_block
                .saturating_add(target.lock_duration);
            if env.ledger().sequence() < unlocks_at {
                return Err(ContractError::StakeLocked);
            }
        }

        Self::harvest(&env, &config, pool_id, &user, &target, &mut stake)?;

        if amount > 0 {
            stake.amount -= amount;
            target.total_staked = target
                .total_staked
                .checked_sub(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            pool::store(&env, pool_id, &target);
        }
        stake.reward_debt = Self::debt_for(&env, &target, stake.amount)?;
        ledger::store(&env, pool_id, &user, &stake);

        // Return the stake after the books are updated.
        Self::transfer(
            &env,
            &target.stake_asset.resolve(&config),
            &env.current_contract_address(),
            &user,
            amount,
        )?;
        Self::bump_instance(&env);

        events::publish_unstaked(&env, pool_id, user, amount, target.total_staked);

        Ok(())
    }

    /// Transfer every reward `user` has earned in `pool_id` and return the
    /// amount. Nothing pending is not an error: the call returns 0.
    pub fn claim(env: Env, user: Address, pool_id: u32) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        user.require_auth();

        if config.is_paused(Operation::Claim) {
            return Err(ContractError::ClaimPaused);
        }

        let target = accrual::settle(&env, &config, pool_id)?;
        let mut stake = ledger::load(&env, pool_id, &user);
        let paid = Self::harvest(&env, &config, pool_id, &user, &target, &mut stake)?;

        stake.reward_debt = Self::debt_for(&env, &target, stake.amount)?;
        ledger::store(&env, pool_id, &user, &stake);
        Self::bump_instance(&env);

        Ok(paid)
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<GlobalConfig, ContractError> {
        config::load(&env)
    }

    /// Stored pool state; accrual may lag the current block until the next
    /// settlement.
    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn total_weight(env: Env) -> u64 {
        pool::total_weight(&env)
    }

    /// Amount `user` currently has staked in `pool_id`.
    pub fn staking_balance(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &user).amount)
    }

    pub fn get_user_stake(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<UserStake, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &user))
    }

    /// Rewards `user` could claim from `pool_id` right now.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let block = env.ledger().sequence();
        Self::pending_reward_at(env, pool_id, user, block)
    }

    /// Rewards `user` could claim from `pool_id` at `block`, assuming no
    /// other activity in between. Blocks before the pool's last settlement
    /// report the stored state.
    pub fn pending_reward_at(
        env: Env,
        pool_id: u32,
        user: Address,
        block: u32,
    ) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        let stored = pool::load(&env, pool_id)?;
        let projected =
            accrual::project(&env, &stored, &config, pool::total_weight(&env), block)?;

        let stake = ledger::load(&env, pool_id, &user);
        let accrued = rewards::pending(
            &env,
            stake.amount,
            &AccPerShare::from_raw(projected.acc_reward_per_share),
            &stake.reward_debt,
        )
        .ok_or(ContractError::ArithmeticOverflow)?;
        accrued
            .checked_add(stake.pending_rewards)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Rewardable blocks in `[from, to)` under the current reward window.
    pub fn get_multiplier(env: Env, from: u32, to: u32) -> Result<u32, ContractError> {
        let config = config::load(&env)?;
        Ok(rewards::reward_blocks(
            from,
            to,
            config.start_block,
            config.end_block,
        ))
    }

    pub fn is_initialized(env: Env) -> bool {
        config::has_config(&env)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    /// Settle `stake` against the already-settled `pool`: transfer everything
    /// owed, or move it to the stash while claims are paused. Returns the
    /// amount transferred. The caller must rewrite `reward_debt` afterwards.
    fn harvest(
        env: &Env,
        config: &GlobalConfig,
        pool_id: u32,
        user: &Address,
        pool: &Pool,
        stake: &mut UserStake,
    ) -> Result<i128, ContractError> {
        let accrued = rewards::pending(
            env,
            stake.amount,
            &AccPerShare::from_raw(pool.acc_reward_per_share.clone()),
            &stake.reward_debt,
        )
        .ok_or(ContractError::ArithmeticOverflow)?;

        if config.claims_paused {
            if accrued > 0 {
                stake.pending_rewards = stake
                    .pending_rewards
                    .checked_add(accrued)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                events::publish_reward_stashed(
                    env,
                    pool_id,
                    user.clone(),
                    accrued,
                    stake.pending_rewards,
                );
            }
            return Ok(0);
        }

        let payout = stake
            .pending_rewards
            .checked_add(accrued)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if payout == 0 {
            return Ok(0);
        }

        stake.pending_rewards = 0;
        Self::transfer(
            env,
            &config.reward_token,
            &env.current_contract_address(),
            user,
            payout,
        )?;
        events::publish_reward_claimed(env, pool_id, user.clone(), payout);

        Ok(payout)
    }

    fn debt_for(env: &Env, pool: &Pool, amount: i128) -> Result<U256, ContractError> {
        AccPerShare::from_raw(pool.acc_reward_per_share.clone())
            .share_of(env, amount)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Move `amount` of `asset` through its token contract. Zero amounts skip
    /// the call; a rejected transfer surfaces as `TransferFailed`.
    fn transfer(
        env: &Env,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount == 0 {
            return Ok(());
        }
        match token::Client::new(env, asset).try_transfer(from, to, &amount) {
            Ok(Ok(_)) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin_tiers;
