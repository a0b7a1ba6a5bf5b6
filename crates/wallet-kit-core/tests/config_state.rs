use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use wallet_kit_core::actions;
use wallet_kit_core::chains::{mainnet, optimism, OPTIMISM_CHAIN_ID};
use wallet_kit_core::{ActionError, ChainSelector, Config, ConnectionStatus};

fn chains_only() -> Config {
    Config::new(vec![mainnet(), optimism()], Vec::new(), HashMap::new()).expect("config")
}

#[test]
fn config_requires_a_chain() {
    let err = Config::new(Vec::new(), Vec::new(), HashMap::new()).expect_err("no chains");
    assert!(matches!(err, ActionError::InvalidConfig(_)));
}

#[test]
fn config_rejects_duplicate_chain_ids() {
    let err = Config::new(vec![mainnet(), mainnet()], Vec::new(), HashMap::new())
        .expect_err("duplicate chains");
    assert_eq!(
        err,
        ActionError::InvalidConfig("duplicate chain id 1".to_owned())
    );
}

#[test]
fn initial_state_reads_first_chain() {
    let config = chains_only();
    let state = config.state().expect("state");
    assert_eq!(state.chain_id, 1);
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert_eq!(state.revision, 0);

    let account = actions::get_account(&config).expect("account");
    assert!(account.address.is_none());
}

#[test]
fn switch_chain_without_connection_moves_read_chain() {
    let config = chains_only();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = config
        .subscribe(move |state| {
            sink.lock().expect("sink lock").push(state.chain_id);
        })
        .expect("subscribe");

    let chain = actions::switch_chain(&config, OPTIMISM_CHAIN_ID).expect("switch chain");
    assert_eq!(chain.id, OPTIMISM_CHAIN_ID);
    assert_eq!(actions::get_chain_id(&config).expect("chain id"), OPTIMISM_CHAIN_ID);
    assert_eq!(
        ChainSelector::Account.resolve(&config).expect("account chain"),
        OPTIMISM_CHAIN_ID
    );
    assert_eq!(*seen.lock().expect("seen lock"), vec![OPTIMISM_CHAIN_ID]);

    assert!(config.unsubscribe(sub).expect("unsubscribe"));
    assert!(!config.unsubscribe(sub).expect("second unsubscribe"));
    actions::switch_chain(&config, 1).expect("switch back");
    assert_eq!(seen.lock().expect("seen lock").len(), 1);
}

#[test]
fn unconfigured_chain_is_rejected() {
    let config = chains_only();
    let err = actions::switch_chain(&config, 42).expect_err("chain 42");
    assert_eq!(err, ActionError::ChainNotConfigured(42));
    assert_eq!(config.state().expect("state").revision, 0);
}

#[test]
fn reads_without_transport_fail() {
    let config = chains_only();
    let err = actions::get_block_number(&config, None).expect_err("no transport");
    assert_eq!(err, ActionError::TransportNotConfigured(1));
}

#[test]
fn actions_without_connection_fail() {
    let config = chains_only();
    assert!(matches!(
        actions::disconnect(&config, None),
        Err(ActionError::ConnectorNotConnected(_))
    ));
    assert!(matches!(
        actions::sign_message(&config, b"hello", None),
        Err(ActionError::ConnectorNotConnected(_))
    ));
    assert!(matches!(
        actions::connect(&config, "missing", None),
        Err(ActionError::ConnectorNotFound(_))
    ));
}

#[test]
fn reconnect_without_authorized_connectors_ends_disconnected() {
    let config = chains_only();
    let restored = actions::reconnect(&config).expect("reconnect");
    assert!(restored.is_empty());
    let state = config.state().expect("state");
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert_eq!(state.revision, 2);
}

#[test]
fn rejected_update_leaves_state_untouched() {
    let config = chains_only();
    let notified = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&notified);
    config
        .subscribe(move |_| *sink.lock().expect("sink lock") += 1)
        .expect("subscribe");

    let err = config
        .try_set_state(|s| {
            s.chain_id = OPTIMISM_CHAIN_ID;
            Err(ActionError::ConnectorAlreadyConnected("mock".to_owned()))
        })
        .expect_err("rejected");
    assert_eq!(err, ActionError::ConnectorAlreadyConnected("mock".to_owned()));

    let state = config.state().expect("state");
    assert_eq!(state.chain_id, 1);
    assert_eq!(state.revision, 0);
    assert_eq!(*notified.lock().expect("notified lock"), 0);

    let state = config
        .try_set_state(|s| {
            s.chain_id = OPTIMISM_CHAIN_ID;
            Ok(())
        })
        .expect("accepted");
    assert_eq!(state.chain_id, OPTIMISM_CHAIN_ID);
    assert_eq!(state.revision, 1);
    assert_eq!(*notified.lock().expect("notified lock"), 1);
}
