use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::domain::{Chain, Connection};
use crate::error::ActionError;
use crate::ports::{ConnectorPort, TransportPort};
use crate::state_machine::ConnectionStatus;

type Listener = Box<dyn Fn(&State) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Chain used for reads when no chain is given explicitly.
    pub chain_id: u64,
    /// Active connections in connect order.
    pub connections: Vec<Connection>,
    /// Connector uid of the current connection.
    pub current: Option<String>,
    pub status: ConnectionStatus,
    pub recent_connector_id: Option<String>,
    pub revision: u64,
}

impl State {
    pub fn connection(&self, uid: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.connector.uid == uid)
    }

    pub fn current_connection(&self) -> Option<&Connection> {
        self.current.as_deref().and_then(|uid| self.connection(uid))
    }
}

/// Chains, connectors and transports plus the shared connection state.
pub struct Config {
    chains: Vec<Chain>,
    connectors: Vec<Arc<dyn ConnectorPort>>,
    transports: HashMap<u64, Arc<dyn TransportPort>>,
    state: Mutex<State>,
    session: Mutex<()>,
    listeners: Mutex<Vec<(Subscription, Listener)>>,
    next_subscription: AtomicU64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connectors: Vec<&str> = self.connectors.iter().map(|c| c.info().uid.as_str()).collect();
        let mut transports: Vec<&u64> = self.transports.keys().collect();
        transports.sort();
        f.debug_struct("Config")
            .field("chains", &self.chains)
            .field("connectors", &connectors)
            .field("transports", &transports)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// The first chain becomes the initial read chain.
    pub fn new(
        chains: Vec<Chain>,
        connectors: Vec<Arc<dyn ConnectorPort>>,
        transports: HashMap<u64, Arc<dyn TransportPort>>,
    ) -> Result<Self, ActionError> {
        let first = chains
            .first()
            .ok_or_else(|| ActionError::InvalidConfig("at least one chain is required".to_owned()))?
            .id;

        let mut seen = HashSet::new();
        for chain in &chains {
            if !seen.insert(chain.id) {
                return Err(ActionError::InvalidConfig(format!(
                    "duplicate chain id {}",
                    chain.id
                )));
            }
        }

        let mut uids = HashSet::new();
        for connector in &connectors {
            let uid = &connector.info().uid;
            if !uids.insert(uid.clone()) {
                return Err(ActionError::InvalidConfig(format!(
                    "duplicate connector uid {uid}"
                )));
            }
        }

        Ok(Self {
            chains,
            connectors,
            transports,
            state: Mutex::new(State {
                chain_id: first,
                connections: Vec::new(),
                current: None,
                status: ConnectionStatus::Disconnected,
                recent_connector_id: None,
                revision: 0,
            }),
            session: Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        })
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, chain_id: u64) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == chain_id)
    }

    pub fn connectors(&self) -> &[Arc<dyn ConnectorPort>] {
        &self.connectors
    }

    pub fn connector(&self, uid: &str) -> Result<&Arc<dyn ConnectorPort>, ActionError> {
        self.connectors
            .iter()
            .find(|c| c.info().uid == uid)
            .ok_or_else(|| ActionError::ConnectorNotFound(uid.to_owned()))
    }

    pub fn transport(&self, chain_id: u64) -> Result<&Arc<dyn TransportPort>, ActionError> {
        self.transports
            .get(&chain_id)
            .ok_or(ActionError::TransportNotConfigured(chain_id))
    }

    pub fn state(&self) -> Result<State, ActionError> {
        let g = self
            .state
            .lock()
            .map_err(|e| ActionError::StateLock(e.to_string()))?;
        Ok(g.clone())
    }

    /// Held by actions that change connections across the connector call, so
    /// two of them never work from the same snapshot.
    pub(crate) fn session(&self) -> Result<MutexGuard<'_, ()>, ActionError> {
        self.session
            .lock()
            .map_err(|e| ActionError::StateLock(e.to_string()))
    }

    /// Applies `update`, bumps the revision and notifies subscribers.
    ///
    /// The read chain follows the current connection's chain whenever that
    /// chain is configured.
    pub fn set_state<F>(&self, update: F) -> Result<State, ActionError>
    where
        F: FnOnce(&mut State),
    {
        self.try_set_state(|s| {
            update(s);
            Ok(())
        })
    }

    /// Like [`Config::set_state`], but `update` sees the live state and may
    /// reject it. A rejected update leaves the state and revision untouched
    /// and notifies nobody.
    pub fn try_set_state<F>(&self, update: F) -> Result<State, ActionError>
    where
        F: FnOnce(&mut State) -> Result<(), ActionError>,
    {
        let snapshot = {
            let mut g = self
                .state
                .lock()
                .map_err(|e| ActionError::StateLock(e.to_string()))?;
            let mut next = g.clone();
            update(&mut next)?;
            let current_chain = next.current_connection().map(|c| c.chain_id);
            if let Some(chain_id) = current_chain {
                if self.chain(chain_id).is_some() {
                    next.chain_id = chain_id;
                }
            }
            next.revision = next.revision.saturating_add(1);
            *g = next;
            g.clone()
        };

        let listeners = self
            .listeners
            .lock()
            .map_err(|e| ActionError::StateLock(e.to_string()))?;
        for (_, listener) in listeners.iter() {
            listener(&snapshot);
        }
        Ok(snapshot)
    }

    /// Listeners run on the thread that changed the state and must not
    /// subscribe, unsubscribe or run connection actions from inside the
    /// callback.
    pub fn subscribe<F>(&self, listener: F) -> Result<Subscription, ActionError>
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        let mut g = self
            .listeners
            .lock()
            .map_err(|e| ActionError::StateLock(e.to_string()))?;
        g.push((id, Box::new(listener)));
        Ok(id)
    }

    /// Returns false when the subscription was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> Result<bool, ActionError> {
        let mut g = self
            .listeners
            .lock()
            .map_err(|e| ActionError::StateLock(e.to_string()))?;
        let before = g.len();
        g.retain(|(id, _)| *id != subscription);
        Ok(g.len() != before)
    }
}
