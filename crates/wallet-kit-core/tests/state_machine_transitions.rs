use wallet_kit_core::state_machine::{is_allowed, transition};
use wallet_kit_core::{ActionError, ConnectionStatus};

#[test]
fn connect_path_is_allowed() {
    use ConnectionStatus::*;
    assert!(is_allowed(Disconnected, Connecting));
    assert!(is_allowed(Connecting, Connected));
    assert!(is_allowed(Connected, Connected));
    assert!(is_allowed(Connected, Disconnected));
}

#[test]
fn reconnect_path_is_allowed() {
    use ConnectionStatus::*;
    assert!(is_allowed(Disconnected, Reconnecting));
    assert!(is_allowed(Reconnecting, Connected));
    assert!(is_allowed(Reconnecting, Disconnected));
}

#[test]
fn skipping_connecting_is_rejected() {
    let err = transition(
        ConnectionStatus::Disconnected,
        ConnectionStatus::Connected,
        "test",
    )
    .expect_err("disconnected cannot jump to connected");
    assert_eq!(
        err,
        ActionError::InvalidTransition {
            from: ConnectionStatus::Disconnected,
            to: ConnectionStatus::Connected,
        }
    );
    assert_eq!(
        err.to_string(),
        "invalid status transition: disconnected -> connected"
    );
}

#[test]
fn reconnecting_cannot_start_a_connect() {
    assert!(!is_allowed(
        ConnectionStatus::Reconnecting,
        ConnectionStatus::Connecting
    ));
    assert!(!is_allowed(
        ConnectionStatus::Connecting,
        ConnectionStatus::Reconnecting
    ));
}

#[test]
fn transition_records_reason() {
    let t = transition(
        ConnectionStatus::Connecting,
        ConnectionStatus::Connected,
        "connector connected",
    )
    .expect("allowed");
    assert_eq!(t.reason, "connector connected");
    assert_eq!(t.to, ConnectionStatus::Connected);
}
