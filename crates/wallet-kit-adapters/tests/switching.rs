mod common;

use wallet_kit_adapters::MockFeatures;
use wallet_kit_core::chains::OPTIMISM_CHAIN_ID;
use wallet_kit_core::{actions, ActionError, ConnectorEventKind, PortError};

use common::{account, harness, harness_with, PRIMARY, SECONDARY};

#[test]
fn switch_account_between_connections() {
    let h = harness();
    actions::connect(&h.config, PRIMARY, None).expect("connect primary");
    actions::connect(&h.config, SECONDARY, None).expect("connect secondary");

    let snapshot = actions::switch_account(&h.config, PRIMARY).expect("switch to primary");
    assert_eq!(snapshot.address, Some(account(0)));
    assert_eq!(snapshot.addresses, vec![account(0), account(1)]);

    let snapshot = actions::switch_account(&h.config, SECONDARY).expect("switch to secondary");
    assert_eq!(snapshot.address, Some(account(2)));
}

#[test]
fn switch_account_requires_connection() {
    let h = harness();
    actions::connect(&h.config, PRIMARY, None).expect("connect primary");
    let err = actions::switch_account(&h.config, SECONDARY).expect_err("secondary idle");
    assert_eq!(err, ActionError::ConnectorNotConnected(SECONDARY.to_owned()));
}

#[test]
fn switch_chain_updates_connection() {
    let h = harness();
    actions::connect(&h.config, PRIMARY, None).expect("connect");

    let chain = actions::switch_chain(&h.config, OPTIMISM_CHAIN_ID).expect("switch chain");
    assert_eq!(chain.name, "OP Mainnet");

    let snapshot = actions::get_account(&h.config).expect("account");
    assert_eq!(snapshot.chain_id, Some(OPTIMISM_CHAIN_ID));
    assert_eq!(
        actions::get_chain_id(&h.config).expect("read chain"),
        OPTIMISM_CHAIN_ID
    );

    let events = h.primary.drain_events().expect("events");
    let last = events.last().expect("chain event");
    assert_eq!(last.kind, ConnectorEventKind::ChainChanged);
    assert_eq!(last.value, "10");
}

#[test]
fn switch_chain_to_same_chain_emits_no_event() {
    let h = harness();
    actions::connect(&h.config, PRIMARY, None).expect("connect");
    h.primary.drain_events().expect("drain connect event");

    actions::switch_chain(&h.config, 1).expect("switch to current chain");
    assert!(h.primary.drain_events().expect("events").is_empty());
}

#[test]
fn switch_chain_error_leaves_chain_unchanged() {
    let h = harness_with(
        MockFeatures {
            switch_chain_error: true,
            ..MockFeatures::default()
        },
        MockFeatures::default(),
    );
    actions::connect(&h.config, PRIMARY, None).expect("connect");

    let err = actions::switch_chain(&h.config, OPTIMISM_CHAIN_ID).expect_err("switch fails");
    assert_eq!(
        err,
        ActionError::Port(PortError::Rejected("Failed to switch chain.".to_owned()))
    );
    assert_eq!(
        actions::get_account(&h.config).expect("account").chain_id,
        Some(1)
    );
}

#[test]
fn switching_account_follows_connection_chain() {
    let h = harness();
    actions::connect(&h.config, PRIMARY, Some(OPTIMISM_CHAIN_ID)).expect("connect primary");
    actions::connect(&h.config, SECONDARY, None).expect("connect secondary");
    assert_eq!(actions::get_chain_id(&h.config).expect("chain"), 1);

    actions::switch_account(&h.config, PRIMARY).expect("switch");
    assert_eq!(
        actions::get_chain_id(&h.config).expect("chain"),
        OPTIMISM_CHAIN_ID
    );
}
