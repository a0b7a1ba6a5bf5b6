use std::collections::HashMap;

use alloy::json_abi::StateMutability;
use alloy::primitives::{b256, Address};

use wallet_kit_test::env::{
    DEFAULT_FORK_BLOCK_NUMBER, DEFAULT_FORK_URL, DEFAULT_WC_PROJECT_ID, FORK_BLOCK_NUMBER_VAR,
    FORK_URL_VAR, POOL_ID_VAR, WC_PROJECT_ID_VAR,
};
use wallet_kit_test::typed_data;
use wallet_kit_test::{
    account_signer, account_signers, erc20_abi, validate_account_literals,
    wagmi_mint_example_abi, FixtureError, TestEnv, ACCOUNTS, ACCOUNT_LITERALS,
};

fn env_from(pairs: &[(&str, &str)]) -> Result<TestEnv, FixtureError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    TestEnv::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn account_literals_are_valid_addresses() {
    validate_account_literals().expect("account literals");
    for literal in ACCOUNT_LITERALS {
        assert_eq!(literal.len(), 42);
        assert!(literal.starts_with("0x"));
    }
}

#[test]
fn accounts_are_distinct_and_non_zero() {
    for (i, a) in ACCOUNTS.iter().enumerate() {
        assert_ne!(*a, Address::ZERO);
        for b in &ACCOUNTS[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn dev_keys_derive_their_accounts() {
    for (index, expected) in ACCOUNTS.iter().enumerate() {
        let signer = account_signer(index).expect("signer");
        assert_eq!(signer.address(), *expected, "key {index}");
    }
    let signers = account_signers().expect("signers");
    assert_eq!(signers.len(), ACCOUNTS.len());
    assert!(signers.iter().map(|s| s.address()).eq(ACCOUNTS.iter().copied()));
}

#[test]
fn account_signer_rejects_out_of_range_index() {
    let err = account_signer(10).expect_err("index 10 is out of range");
    assert_eq!(err, FixtureError::AccountIndex(10));
}

#[test]
fn env_defaults_apply_when_unset() {
    let env = env_from(&[]).expect("env");
    assert_eq!(env, TestEnv::default());
    assert_eq!(env.pool, 1);
    assert_eq!(env.fork_url, DEFAULT_FORK_URL);
    assert_eq!(env.fork_block_number, DEFAULT_FORK_BLOCK_NUMBER);
    assert_eq!(env.wallet_connect_project_id, DEFAULT_WC_PROJECT_ID);
}

#[test]
fn env_defaults_apply_when_empty() {
    let env = env_from(&[(FORK_URL_VAR, ""), (FORK_BLOCK_NUMBER_VAR, "")]).expect("env");
    assert_eq!(env.fork_url, DEFAULT_FORK_URL);
    assert_eq!(env.fork_block_number, DEFAULT_FORK_BLOCK_NUMBER);
}

#[test]
fn env_values_override_defaults() {
    let env = env_from(&[
        (POOL_ID_VAR, "3"),
        (FORK_URL_VAR, "http://localhost:9999"),
        (FORK_BLOCK_NUMBER_VAR, "17000000"),
        (WC_PROJECT_ID_VAR, "project"),
    ])
    .expect("env");
    assert_eq!(env.pool, 3);
    assert_eq!(env.fork_url, "http://localhost:9999");
    assert_eq!(env.fork_block_number, 17_000_000);
    assert_eq!(env.wallet_connect_project_id, "project");
    assert_eq!(env.anvil_rpc_url(8545), "http://127.0.0.1:8545/3");
}

#[test]
fn env_accepts_hex_block_number() {
    let env = env_from(&[(FORK_BLOCK_NUMBER_VAR, "0x10")]).expect("env");
    assert_eq!(env.fork_block_number, 16);
}

#[test]
fn env_rejects_non_numeric_block_number() {
    let err = env_from(&[(FORK_BLOCK_NUMBER_VAR, "latest")]).expect_err("invalid block");
    match err {
        FixtureError::InvalidEnv { var, value, .. } => {
            assert_eq!(var, FORK_BLOCK_NUMBER_VAR);
            assert_eq!(value, "latest");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_chains_route_through_pool() {
    let env = env_from(&[(POOL_ID_VAR, "7")]).expect("env");
    let chains = wallet_kit_test::chains::test_chains(&env);
    let ids: Vec<u64> = chains.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 456, 10]);
    assert_eq!(chains[0].rpc_url, "http://127.0.0.1:8545/7");
    assert_eq!(chains[2].rpc_url, "http://127.0.0.1:8547/7");
}

#[test]
fn typed_data_type_graphs_are_closed() {
    assert!(typed_data::basic().undefined_type_references().is_empty());
    assert!(typed_data::complex().undefined_type_references().is_empty());
}

#[test]
fn dangling_struct_reference_is_reported() {
    let mut fixture = typed_data::complex();
    fixture.types.remove("Name");
    assert_eq!(fixture.undefined_type_references(), vec!["Name".to_owned()]);
}

#[test]
fn basic_typed_data_matches_reference_encoding() {
    let typed = typed_data::basic().to_typed_data().expect("typed data");
    assert_eq!(
        typed.encode_type().expect("encode type"),
        "Mail(Person from,Person to,string contents)Person(string name,address wallet)"
    );
    assert_eq!(
        typed.hash_struct().expect("hash struct"),
        b256!("c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e")
    );
}

#[test]
fn complex_typed_data_hashes() {
    let complex = typed_data::complex();
    let hash = complex.signing_hash().expect("signing hash");
    assert_eq!(hash, complex.signing_hash().expect("second hash"));
    assert_ne!(hash, typed_data::basic().signing_hash().expect("basic hash"));

    let typed = complex.to_typed_data().expect("typed data");
    assert_eq!(typed.primary_type, "Mail");
    assert_eq!(
        typed.encode_type().expect("encode type"),
        "Mail(uint256 timestamp,Person from,Person to,string contents,bytes hash)\
         Name(string first,string last)\
         Person(Name name,address wallet,string[3] favoriteColors,uint256 foo,uint8 age,bool isCool)"
    );
}

#[test]
fn erc20_abi_parses_all_signatures() {
    let abi = erc20_abi().expect("erc20 abi");
    assert_eq!(abi.functions().count(), 9);
    assert_eq!(abi.events().count(), 2);
    assert!(abi.constructor.is_none());

    let transfer = &abi.function("transfer").expect("transfer")[0];
    assert_eq!(transfer.selector().0, [0xa9, 0x05, 0x9c, 0xbb]);

    let balance_of = &abi.function("balanceOf").expect("balanceOf")[0];
    assert_eq!(balance_of.state_mutability, StateMutability::View);
    assert_eq!(balance_of.outputs[0].ty, "uint256");
}

#[test]
fn mint_example_abi_keeps_overloads() {
    let abi = wagmi_mint_example_abi().expect("mint abi");
    assert!(abi.constructor.is_some());
    assert_eq!(abi.functions().count(), 15);
    assert_eq!(abi.events().count(), 3);
    assert_eq!(abi.function("safeTransferFrom").map(Vec::len), Some(2));

    let transfer = &abi.event("Transfer").expect("Transfer")[0];
    assert!(transfer.inputs.iter().all(|input| input.indexed));

    let token_uri = &abi.function("tokenURI").expect("tokenURI")[0];
    assert_eq!(token_uri.state_mutability, StateMutability::Pure);
}
