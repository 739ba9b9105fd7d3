//! Shared authorization building blocks for the staking contracts.
//!
//! - [`admin_tiers`]: the three-tier admin hierarchy kept in contract storage.
//! - [`access_gate`]: the [`AccessGate`] capability check contracts consult
//!   before any configuration mutation, with a tier-backed implementation.

#![no_std]

pub mod access_gate;
pub mod admin_tiers;

pub use access_gate::{AccessGate, DenyAll, TieredAction, TieredGate};
pub use admin_tiers::AdminTier;
