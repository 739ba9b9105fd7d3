extern crate std;

use common::admin_tiers::{TTL_EXTEND_TO, TTL_THRESHOLD};
use common::AdminTier;
use soroban_sdk::{
    symbol_short,
    testutils::{storage::Persistent as _, Address as _, Events as _},
    xdr, Address, Env, IntoVal, TryFromVal, TryIntoVal, Val, Vec,
};

use crate::config::{LockPolicy, Operation};
use crate::events::{AdminDemotedEvent, AdminPromotedEvent};
use crate::pool::StakeAsset;
use crate::{ContractError, StakingPoolsContract, StakingPoolsContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingPoolsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let native = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &native.address(),
        &reward_token.address(),
        &10,
        &0,
        &None,
    );

    (env, client, admin)
}

fn promoted(
    env: &Env,
    client: &StakingPoolsContractClient,
    admin: &Address,
    tier: AdminTier,
) -> Address {
    let target = Address::generate(env);
    client.promote_admin(admin, &target, &tier);
    target
}

/// Returns the last published contract event as `(contract, topics, data)`.
fn last_event(env: &Env) -> (Address, Vec<Val>, Val) {
    let all = env.events().all();
    let event = all.events().last().unwrap().clone();
    let contract = Address::try_from_val(
        env,
        &xdr::ScVal::Address(xdr::ScAddress::Contract(event.contract_id.unwrap())),
    )
    .unwrap();
    let xdr::ContractEventBody::V0(body) = event.body;
    let topics = Vec::<Val>::try_from_val(
        env,
        &xdr::ScVal::Vec(Some(xdr::ScVec(body.topics))),
    )
    .unwrap();
    let data = Val::try_from_val(env, &body.data).unwrap();
    (contract, topics, data)
}

fn add_native_pool(
    client: &StakingPoolsContractClient,
    caller: &Address,
) -> Result<u32, ContractError> {
    match client.try_add_pool(caller, &StakeAsset::Native, &100, &0, &0, &true) {
        Ok(Ok(id)) => Ok(id),
        Err(Ok(e)) => Err(e),
        _ => unreachable!("Unexpected host error"),
    }
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin) = setup();
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
    assert_eq!(client.list_admins().len(), 1);
}

#[test]
fn test_non_admin_has_no_tier() {
    let (env, client, _admin) = setup();
    let random = Address::generate(&env);
    assert_eq!(client.get_admin_tier(&random), None);
}

// ── Promote / demote ─────────────────────────────────────────────────────────

#[test]
fn test_super_admin_promotes_every_tier() {
    let (env, client, admin) = setup();

    for tier in [
        AdminTier::OperatorAdmin,
        AdminTier::ContractAdmin,
        AdminTier::SuperAdmin,
    ] {
        let target = promoted(&env, &client, &admin, tier.clone());
        assert_eq!(client.get_admin_tier(&target), Some(tier));
    }
    assert_eq!(client.list_admins().len(), 4);
}

#[test]
fn test_super_admin_demotes_admin() {
    let (env, client, admin) = setup();
    let target = promoted(&env, &client, &admin, AdminTier::ContractAdmin);

    client.demote_admin(&admin, &target);
    assert_eq!(client.get_admin_tier(&target), None);
    assert!(!client.list_admins().contains(&target));
}

#[test]
fn test_bootstrap_admin_cannot_be_demoted() {
    let (env, client, admin) = setup();
    let other_root = promoted(&env, &client, &admin, AdminTier::SuperAdmin);

    let result = client.try_demote_admin(&other_root, &admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

#[test]
fn test_lower_tiers_cannot_promote_or_demote() {
    let (env, client, admin) = setup();
    let contract_admin = promoted(&env, &client, &admin, AdminTier::ContractAdmin);
    let operator = promoted(&env, &client, &admin, AdminTier::OperatorAdmin);
    let target = Address::generate(&env);

    for caller in [&contract_admin, &operator] {
        let result = client.try_promote_admin(caller, &target, &AdminTier::OperatorAdmin);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
            _ => unreachable!("Expected Unauthorized error"),
        }
    }

    let result = client.try_demote_admin(&contract_admin, &operator);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_admin_roster_outlives_tier_changes() {
    let (env, client, admin) = setup();
    let target = promoted(&env, &client, &admin, AdminTier::OperatorAdmin);
    client.demote_admin(&admin, &target);

    let ttl = env.as_contract(&client.address, || {
        env.storage().persistent().get_ttl(&symbol_short!("ADM_LIST"))
    });
    assert!(ttl >= TTL_THRESHOLD);
    assert!(ttl <= TTL_EXTEND_TO);
    assert_eq!(client.list_admins().len(), 1);
}

#[test]
fn test_tier_changes_publish_events() {
    let (env, client, admin) = setup();

    let target = promoted(&env, &client, &admin, AdminTier::ContractAdmin);
    let event = last_event(&env);
    assert_eq!(event.0, client.address);
    assert_eq!(
        event.1,
        (symbol_short!("ADM_PROM"), target.clone()).into_val(&env)
    );
    let payload: AdminPromotedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.caller, admin);
    assert_eq!(payload.tier, AdminTier::ContractAdmin);

    client.demote_admin(&admin, &target);
    let event = last_event(&env);
    assert_eq!(
        event.1,
        (symbol_short!("ADM_DEM"), target.clone()).into_val(&env)
    );
    let payload: AdminDemotedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.admin, target);
}

// ── Tiers gate configuration ─────────────────────────────────────────────────

#[test]
fn test_contract_admin_can_configure_pools() {
    let (env, client, admin) = setup();
    let contract_admin = promoted(&env, &client, &admin, AdminTier::ContractAdmin);

    let pool_id = add_native_pool(&client, &contract_admin).unwrap();
    client.set_pool_weight(&contract_admin, &pool_id, &250, &true);
    client.update_pool(&contract_admin, &pool_id, &5, &5);
    client.set_reward_per_block(&contract_admin, &20);
    client.set_lock_policy(&contract_admin, &LockPolicy::Enforced);

    assert_eq!(client.get_pool(&pool_id).weight, 250);
    assert_eq!(client.get_config().reward_per_block, 20);
}

#[test]
fn test_operator_admin_can_only_pause() {
    let (env, client, admin) = setup();
    let operator = promoted(&env, &client, &admin, AdminTier::OperatorAdmin);

    client.set_paused(&operator, &Operation::Claim, &true);
    assert!(client.get_config().claims_paused);

    assert_eq!(add_native_pool(&client, &operator), Err(ContractError::Unauthorized));
    let result = client.try_set_reward_per_block(&operator, &99);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_non_admin_cannot_pause() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_set_paused(&intruder, &Operation::Unstake, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(!client.get_config().unstakes_paused);
}

#[test]
fn test_demoted_admin_loses_access() {
    let (env, client, admin) = setup();
    let contract_admin = promoted(&env, &client, &admin, AdminTier::ContractAdmin);
    add_native_pool(&client, &contract_admin).unwrap();

    client.demote_admin(&admin, &contract_admin);
    assert_eq!(
        add_native_pool(&client, &contract_admin),
        Err(ContractError::Unauthorized)
    );
    assert_eq!(client.pool_count(), 1);
}
