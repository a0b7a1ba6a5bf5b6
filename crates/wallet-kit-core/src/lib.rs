pub mod actions;
pub mod chains;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod state_machine;
pub mod watch;

pub use config::{Config, State, Subscription};
pub use domain::{
    AccountSnapshot, Balance, Chain, Connection, ConnectorEvent, ConnectorEventKind,
    ConnectorInfo, ConnectorKind, NativeCurrency,
};
pub use error::ActionError;
pub use ports::{ConnectResult, ConnectorPort, PortError, TransportPort};
pub use state_machine::{ConnectionStatus, StatusTransition};
pub use watch::{ChainSelector, Watcher};
