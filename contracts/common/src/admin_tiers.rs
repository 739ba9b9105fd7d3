use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

const TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const ROOT_ADMIN: Symbol = symbol_short!("ROOT_ADM");
const TIER_ROSTER: Symbol = symbol_short!("ADM_LIST");

/// Roughly 30 days of 5-second ledgers.
pub const TTL_THRESHOLD: u32 = 518_400;
pub const TTL_EXTEND_TO: u32 = 535_680;

// ── Tiers ────────────────────────────────────────────────────────────────────

/// Ordered admin hierarchy.
///
/// - `OperatorAdmin` – may pause and resume user-facing operations.
/// - `ContractAdmin` – may change contract configuration (pools, emission).
/// - `SuperAdmin`    – everything above, plus granting and revoking tiers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// True if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (TIER_PREFIX, admin.clone())
}

// ── Tier assignment ──────────────────────────────────────────────────────────

/// Writes `tier` for `admin` without any permission check; callers gate it.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    track_admin(env, admin);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    env.storage().persistent().get(&tier_key(admin))
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&tier_key(admin));
    untrack_admin(env, admin);
}

/// Returns `true` when `caller` holds `min_tier` or higher.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    get_admin_tier(env, caller).is_some_and(|tier| tier.has_at_least(min_tier))
}

/// Records the bootstrap admin and grants it `SuperAdmin`.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ROOT_ADMIN, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ROOT_ADMIN)
}

// ── Promote / demote ─────────────────────────────────────────────────────────

/// Grants `tier` to `target`. Returns `false` if `caller` is not a SuperAdmin.
///
/// The caller must already have been authenticated with `require_auth()`.
pub fn promote_admin(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    true
}

/// Revokes every tier held by `target`. Returns `false` if `caller` is not a
/// SuperAdmin. The bootstrap admin cannot be demoted.
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    if get_super_admin(env).as_ref() == Some(target) {
        return false;
    }
    remove_admin_tier(env, target);
    true
}

// ── Roster ───────────────────────────────────────────────────────────────────

/// Every address currently holding a tier, in grant order.
pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&TIER_ROSTER)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if admins.contains(admin) {
        return;
    }
    admins.push_back(admin.clone());
    store_roster(env, &admins);
}

fn untrack_admin(env: &Env, admin: &Address) {
    let admins = list_admins(env);
    let mut kept = Vec::new(env);
    for a in admins.iter() {
        if a != *admin {
            kept.push_back(a);
        }
    }
    store_roster(env, &kept);
}

fn store_roster(env: &Env, admins: &Vec<Address>) {
    env.storage().persistent().set(&TIER_ROSTER, admins);
    env.storage()
        .persistent()
        .extend_ttl(&TIER_ROSTER, TTL_THRESHOLD, TTL_EXTEND_TO);
}
