//! Wallet operations over a [`Config`].
//!
//! Each action reads the shared state, calls at most one connector or
//! transport, then commits the outcome through [`Config::try_set_state`],
//! re-checking the live state. Actions that change connections also hold the
//! config's session lock across the connector call.

use std::sync::Arc;

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, Bytes};
use tracing::{debug, info, warn};

use crate::config::{Config, State};
use crate::domain::{AccountSnapshot, Balance, Chain, Connection, ConnectorInfo};
use crate::error::ActionError;
use crate::ports::{ConnectorPort, PortError};
use crate::state_machine::{transition, ConnectionStatus};

pub fn get_account(config: &Config) -> Result<AccountSnapshot, ActionError> {
    let state = config.state()?;
    Ok(account_from_state(&state))
}

pub fn account_from_state(state: &State) -> AccountSnapshot {
    match state.current_connection() {
        Some(conn) => AccountSnapshot {
            address: conn.accounts.first().copied(),
            addresses: conn.accounts.clone(),
            chain_id: Some(conn.chain_id),
            connector: Some(conn.connector.clone()),
            status: state.status,
        },
        None => AccountSnapshot {
            status: state.status,
            ..AccountSnapshot::disconnected()
        },
    }
}

pub fn get_connections(config: &Config) -> Result<Vec<Connection>, ActionError> {
    Ok(config.state()?.connections)
}

pub fn get_chain_id(config: &Config) -> Result<u64, ActionError> {
    Ok(config.state()?.chain_id)
}

pub fn connectors(config: &Config) -> Vec<ConnectorInfo> {
    config.connectors().iter().map(|c| c.info().clone()).collect()
}

pub fn chains(config: &Config) -> &[Chain] {
    config.chains()
}

pub fn connect(
    config: &Config,
    connector_uid: &str,
    chain_id: Option<u64>,
) -> Result<Connection, ActionError> {
    let connector = Arc::clone(config.connector(connector_uid)?);
    if let Some(id) = chain_id {
        config.chain(id).ok_or(ActionError::ChainNotConfigured(id))?;
    }

    let _session = config.session()?;
    // An existing connection keeps the config connected while another wallet connects.
    let pending = config
        .try_set_state(|s| {
            ensure_not_connected(s, connector_uid)?;
            let pending = if s.status == ConnectionStatus::Connected {
                ConnectionStatus::Connected
            } else {
                ConnectionStatus::Connecting
            };
            transition(s.status, pending, "connect requested")?;
            s.status = pending;
            Ok(())
        })?
        .status;

    let outcome = establish(connector.as_ref(), chain_id)
        .map_err(ActionError::from)
        .and_then(|connection| {
            let committed = connection.clone();
            config.try_set_state(move |s| {
                ensure_not_connected(s, connector_uid)?;
                transition(s.status, ConnectionStatus::Connected, "connector connected")?;
                s.current = Some(committed.connector.uid.clone());
                s.recent_connector_id = Some(committed.connector.id.clone());
                s.connections.push(committed);
                s.status = ConnectionStatus::Connected;
                Ok(())
            })?;
            Ok(connection)
        });

    match outcome {
        Ok(connection) => {
            info!(
                connector = connector_uid,
                chain_id = connection.chain_id,
                accounts = connection.accounts.len(),
                "connected"
            );
            Ok(connection)
        }
        Err(e) => {
            config.set_state(|s| {
                if pending == ConnectionStatus::Connecting && s.connections.is_empty() {
                    s.status = ConnectionStatus::Disconnected;
                }
            })?;
            warn!(connector = connector_uid, error = %e, "connect failed");
            Err(e)
        }
    }
}

fn ensure_not_connected(state: &State, connector_uid: &str) -> Result<(), ActionError> {
    if state.connection(connector_uid).is_some() {
        return Err(ActionError::ConnectorAlreadyConnected(connector_uid.to_owned()));
    }
    Ok(())
}

fn establish(
    connector: &dyn ConnectorPort,
    chain_id: Option<u64>,
) -> Result<Connection, PortError> {
    let result = connector.connect(chain_id)?;
    if result.accounts.is_empty() {
        return Err(PortError::Validation(format!(
            "connector {} returned no accounts",
            connector.info().uid
        )));
    }
    Ok(Connection {
        connector: connector.info().clone(),
        accounts: result.accounts,
        chain_id: result.chain_id,
    })
}

fn connected_uid(state: &State, connector_uid: Option<&str>) -> Result<String, ActionError> {
    let uid = match connector_uid {
        Some(uid) => uid.to_owned(),
        None => state
            .current
            .clone()
            .ok_or_else(|| ActionError::ConnectorNotConnected("no current connection".to_owned()))?,
    };
    if state.connection(&uid).is_none() {
        return Err(ActionError::ConnectorNotConnected(uid));
    }
    Ok(uid)
}

fn status_after_removal(remaining: usize) -> ConnectionStatus {
    if remaining == 0 {
        ConnectionStatus::Disconnected
    } else {
        ConnectionStatus::Connected
    }
}

/// Disconnects `connector_uid`, or the current connection when `None`.
pub fn disconnect(config: &Config, connector_uid: Option<&str>) -> Result<(), ActionError> {
    let _session = config.session()?;
    let state = config.state()?;
    let uid = connected_uid(&state, connector_uid)?;
    transition(
        state.status,
        status_after_removal(state.connections.len() - 1),
        "disconnect requested",
    )?;

    let connector = Arc::clone(config.connector(&uid)?);
    if let Err(e) = connector.disconnect() {
        // The connection is dropped locally either way.
        warn!(connector = %uid, error = %e, "connector disconnect failed");
    }

    let state = config.try_set_state(|s| {
        let uid = connected_uid(s, Some(uid.as_str()))?;
        s.connections.retain(|c| c.connector.uid != uid);
        let next = status_after_removal(s.connections.len());
        transition(s.status, next, "disconnect requested")?;
        if s.current.as_deref() == Some(uid.as_str()) {
            s.current = s.connections.first().map(|c| c.connector.uid.clone());
        }
        s.status = next;
        Ok(())
    })?;
    info!(connector = %uid, remaining = state.connections.len(), "disconnected");
    Ok(())
}

/// Silently restores connections for connectors that are still authorized,
/// trying the most recently used connector first.
pub fn reconnect(config: &Config) -> Result<Vec<Connection>, ActionError> {
    let _session = config.session()?;
    let state = config.state()?;
    if !state.connections.is_empty() {
        return Ok(state.connections);
    }

    config.try_set_state(|s| {
        transition(s.status, ConnectionStatus::Reconnecting, "reconnect requested")?;
        s.status = ConnectionStatus::Reconnecting;
        Ok(())
    })?;

    let mut ordered: Vec<&Arc<dyn ConnectorPort>> = config.connectors().iter().collect();
    if let Some(recent) = state.recent_connector_id.as_deref() {
        ordered.sort_by_key(|c| c.info().id != recent);
    }

    let mut restored = Vec::new();
    for connector in ordered {
        let uid = connector.info().uid.clone();
        match connector.is_authorized() {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                debug!(connector = %uid, error = %e, "authorization check failed");
                continue;
            }
        }
        match establish(connector.as_ref(), None) {
            Ok(connection) => restored.push(connection),
            Err(e) => warn!(connector = %uid, error = %e, "reconnect failed"),
        }
    }

    let committed = restored.clone();
    let state = config.try_set_state(move |s| {
        for connection in committed {
            if s.connection(&connection.connector.uid).is_none() {
                s.connections.push(connection);
            }
        }
        let next = status_after_removal(s.connections.len());
        transition(s.status, next, "reconnect finished")?;
        if s.current_connection().is_none() {
            s.current = s.connections.first().map(|c| c.connector.uid.clone());
        }
        s.status = next;
        Ok(())
    })?;
    info!(restored = restored.len(), "reconnect finished");
    Ok(state.connections)
}

/// Makes another existing connection the current one.
pub fn switch_account(config: &Config, connector_uid: &str) -> Result<AccountSnapshot, ActionError> {
    let state = config.try_set_state(|s| {
        let uid = connected_uid(s, Some(connector_uid))?;
        transition(s.status, ConnectionStatus::Connected, "account switched")?;
        s.current = Some(uid);
        Ok(())
    })?;
    debug!(connector = connector_uid, "switched account");
    Ok(account_from_state(&state))
}

/// Switches the current connector's chain, or the read chain when disconnected.
pub fn switch_chain(config: &Config, chain_id: u64) -> Result<Chain, ActionError> {
    let chain = config
        .chain(chain_id)
        .cloned()
        .ok_or(ActionError::ChainNotConfigured(chain_id))?;

    let _session = config.session()?;
    let state = config.state()?;
    match state.current_connection() {
        Some(conn) => {
            let uid = conn.connector.uid.clone();
            let connector = Arc::clone(config.connector(&uid)?);
            let switched = connector.switch_chain(chain_id)?;
            config.set_state(|s| {
                if let Some(c) = s.connections.iter_mut().find(|c| c.connector.uid == uid) {
                    c.chain_id = switched;
                }
            })?;
            info!(connector = %uid, chain_id = switched, "switched chain");
        }
        None => {
            config.set_state(|s| s.chain_id = chain_id)?;
            debug!(chain_id, "switched read chain");
        }
    }
    Ok(chain)
}

fn signing_context(
    config: &Config,
    account: Option<Address>,
) -> Result<(Arc<dyn ConnectorPort>, Address), ActionError> {
    let state = config.state()?;
    let conn = state
        .current_connection()
        .ok_or_else(|| ActionError::ConnectorNotConnected("no current connection".to_owned()))?;
    let account = match account {
        Some(a) if conn.accounts.contains(&a) => a,
        Some(a) => {
            return Err(ActionError::AccountNotFound {
                account: a,
                connector: conn.connector.uid.clone(),
            })
        }
        None => *conn.accounts.first().ok_or_else(|| {
            ActionError::ConnectorNotConnected(conn.connector.uid.clone())
        })?,
    };
    let connector = Arc::clone(config.connector(&conn.connector.uid)?);
    Ok((connector, account))
}

/// Signs `message` with the current connector, defaulting to its first account.
pub fn sign_message(
    config: &Config,
    message: &[u8],
    account: Option<Address>,
) -> Result<Bytes, ActionError> {
    let (connector, account) = signing_context(config, account)?;
    let signature = connector.sign_message(account, message)?;
    debug!(%account, bytes = message.len(), "signed message");
    Ok(signature)
}

pub fn sign_typed_data(
    config: &Config,
    typed_data: &TypedData,
    account: Option<Address>,
) -> Result<Bytes, ActionError> {
    let (connector, account) = signing_context(config, account)?;
    let signature = connector.sign_typed_data(account, typed_data)?;
    debug!(%account, primary_type = %typed_data.primary_type, "signed typed data");
    Ok(signature)
}

fn read_chain(config: &Config, chain_id: Option<u64>) -> Result<&Chain, ActionError> {
    let id = match chain_id {
        Some(id) => id,
        None => get_chain_id(config)?,
    };
    config.chain(id).ok_or(ActionError::ChainNotConfigured(id))
}

/// Native balance on `chain_id`, or on the read chain when `None`.
pub fn get_balance(
    config: &Config,
    address: Address,
    chain_id: Option<u64>,
) -> Result<Balance, ActionError> {
    let chain = read_chain(config, chain_id)?;
    let value = config.transport(chain.id)?.balance(address)?;
    Ok(Balance::new(
        value,
        chain.native_currency.decimals,
        chain.native_currency.symbol.clone(),
    ))
}

pub fn get_block_number(config: &Config, chain_id: Option<u64>) -> Result<u64, ActionError> {
    let chain = read_chain(config, chain_id)?;
    Ok(config.transport(chain.id)?.block_number()?)
}
