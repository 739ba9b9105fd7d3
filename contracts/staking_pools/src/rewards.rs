//! Fixed-point reward math.
//!
//! Division truncates toward zero, so every rounding error stays in the
//! contract and the sum of what users can claim never exceeds what was emitted.
//!
//! The accumulator and reward debts are 256-bit. A dust stake alone in a pool
//! drives `acc_reward_per_share` far past what an `i128` product with a large
//! later deposit can hold, and `amount × acc / SCALE` for that deposit does not
//! fit an `i128` either. Only the difference between two such values, which is
//! bounded by the emission, is narrowed back to `i128`.

use soroban_sdk::{Env, U256};

/// Scale of [`AccPerShare`]. A settlement loses at most
/// `total_staked / SCALE` base units to truncation.
pub const SCALE: u128 = 1_000_000_000_000;

/// Cumulative reward earned by one unit of stake, scaled by [`SCALE`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccPerShare(U256);

/// Widens a non-negative ledger amount. Negative input is `None`.
pub fn units(env: &Env, value: i128) -> Option<U256> {
    u128::try_from(value).ok().map(|v| U256::from_u128(env, v))
}

/// Narrows a 256-bit amount back to the ledger's `i128`.
pub fn narrow(value: &U256) -> Option<i128> {
    value.to_u128().and_then(|v| i128::try_from(v).ok())
}

fn scale(env: &Env) -> U256 {
    U256::from_u128(env, SCALE)
}

impl AccPerShare {
    pub fn zero(env: &Env) -> Self {
        AccPerShare(U256::from_u32(env, 0))
    }

    pub fn from_raw(raw: U256) -> Self {
        AccPerShare(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0.clone()
    }

    /// Spreads `emission` over `total_staked` units:
    ///
    /// ```text
    /// acc' = acc + emission × SCALE / total_staked
    /// ```
    ///
    /// With no stake the accumulator is returned unchanged; that reward is
    /// forfeited rather than carried forward.
    pub fn accrue(&self, env: &Env, emission: &U256, total_staked: i128) -> Self {
        let zero = U256::from_u32(env, 0);
        if total_staked <= 0 || *emission == zero {
            return self.clone();
        }
        let delta = emission
            .mul(&scale(env))
            .div(&U256::from_u128(env, total_staked as u128));
        AccPerShare(self.0.add(&delta))
    }

    /// Reward attributable to `amount` units since the accumulator was zero,
    /// i.e. `amount × acc / SCALE`. This is also the value stored as reward
    /// debt after a settlement. `None` for a negative amount.
    pub fn share_of(&self, env: &Env, amount: i128) -> Option<U256> {
        Some(units(env, amount)?.mul(&self.0).div(&scale(env)))
    }
}

/// Rewardable blocks in `[from, to)` once clamped to the reward window
/// `[start, end)`.
pub fn reward_blocks(from: u32, to: u32, start: u32, end: Option<u32>) -> u32 {
    let from = from.max(start);
    let to = match end {
        Some(end) => to.min(end),
        None => to,
    };
    to.saturating_sub(from)
}

/// A pool's slice of the emission over `blocks`:
///
/// ```text
/// blocks × reward_per_block × weight / total_weight
/// ```
///
/// The product is at most 2^32 × 2^127 × 2^64 and never overflows 256 bits.
/// `None` only for a negative rate.
pub fn pool_emission(
    env: &Env,
    blocks: u32,
    reward_per_block: i128,
    weight: u64,
    total_weight: u64,
) -> Option<U256> {
    let rate = units(env, reward_per_block)?;
    if blocks == 0 || weight == 0 || total_weight == 0 {
        return Some(U256::from_u32(env, 0));
    }
    Some(
        U256::from_u32(env, blocks)
            .mul(&rate)
            .mul(&U256::from_u128(env, u128::from(weight)))
            .div(&U256::from_u128(env, u128::from(total_weight))),
    )
}

/// What a position with `amount` and `reward_debt` can claim at `acc`.
///
/// `reward_debt` was taken as `share_of(amount)` at an accumulator no larger
/// than `acc`, so the difference is never negative while `amount` is
/// unchanged. It is clamped at zero regardless.
pub fn pending(env: &Env, amount: i128, acc: &AccPerShare, reward_debt: &U256) -> Option<i128> {
    let accrued = acc.share_of(env, amount)?;
    if accrued <= *reward_debt {
        return Some(0);
    }
    narrow(&accrued.sub(reward_debt))
}
