mod common;

use std::sync::mpsc;
use std::time::Duration;

use alloy::primitives::U256;

use wallet_kit_core::chains::OPTIMISM_CHAIN_ID;
use wallet_kit_core::watch::{watch_balance, watch_block_number};
use wallet_kit_core::{actions, ActionError, ChainSelector, TransportPort};

use common::{account, harness, one_ether, PRIMARY};

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn balance_reads_use_chain_currency() {
    let h = harness();
    let balance = actions::get_balance(&h.config, account(0), None).expect("balance");
    assert_eq!(balance.formatted, "10000");
    assert_eq!(balance.symbol, "ETH");
    assert_eq!(balance.decimals, 18);

    h.optimism
        .set_balance(account(0), one_ether() / U256::from(4u64))
        .expect("set balance");
    let balance = actions::get_balance(&h.config, account(0), Some(OPTIMISM_CHAIN_ID))
        .expect("optimism balance");
    assert_eq!(balance.formatted, "0.25");
}

#[test]
fn balance_on_unknown_chain_fails() {
    let h = harness();
    let err = actions::get_balance(&h.config, account(0), Some(8453)).expect_err("base");
    assert_eq!(err, ActionError::ChainNotConfigured(8453));
}

#[test]
fn block_number_reads_per_chain() {
    let h = harness();
    assert_eq!(
        actions::get_block_number(&h.config, None).expect("mainnet block"),
        16_280_770
    );
    assert_eq!(
        actions::get_block_number(&h.config, Some(OPTIMISM_CHAIN_ID)).expect("optimism block"),
        1
    );
    assert_eq!(h.optimism.chain_id().expect("chain id"), OPTIMISM_CHAIN_ID);
}

#[test]
fn block_number_watcher_emits_on_change() {
    let h = harness();
    let (tx, rx) = mpsc::channel();
    let mut watcher = watch_block_number(
        h.config.clone(),
        ChainSelector::Fixed(OPTIMISM_CHAIN_ID),
        Duration::from_millis(10),
        move |n| {
            let _ = tx.send(n);
        },
    );

    assert_eq!(rx.recv_timeout(TIMEOUT).expect("first block"), 1);
    h.optimism.mine(2).expect("mine");
    assert_eq!(rx.recv_timeout(TIMEOUT).expect("next block"), 3);
    assert!(watcher.is_running());

    watcher.stop();
    assert!(!watcher.is_running());
    // Unchanged heads are never re-emitted.
    assert!(rx.try_iter().all(|n| n == 3));
}

#[test]
fn balance_watcher_follows_account() {
    let h = harness();
    let (tx, rx) = mpsc::channel();
    let mut watcher = watch_balance(
        h.config.clone(),
        ChainSelector::Account,
        Duration::from_millis(10),
        move |balance| {
            let _ = tx.send(balance.map(|b| b.formatted));
        },
    );

    assert_eq!(rx.recv_timeout(TIMEOUT).expect("no account"), None);

    actions::connect(&h.config, PRIMARY, None).expect("connect");
    assert_eq!(
        rx.recv_timeout(TIMEOUT).expect("connected balance"),
        Some("10000".to_owned())
    );

    actions::disconnect(&h.config, None).expect("disconnect");
    assert_eq!(rx.recv_timeout(TIMEOUT).expect("cleared"), None);
    watcher.stop();
}
