//! Background polling for block numbers and balances.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::actions;
use crate::config::Config;
use crate::domain::Balance;
use crate::error::ActionError;

/// Which chain a watcher reads, resolved again on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSelector {
    /// The config's read chain.
    Default,
    /// The current connection's chain, or the read chain when disconnected.
    Account,
    Fixed(u64),
}

impl ChainSelector {
    pub fn resolve(&self, config: &Config) -> Result<u64, ActionError> {
        match self {
            Self::Default => actions::get_chain_id(config),
            Self::Account => {
                let state = config.state()?;
                Ok(state
                    .current_connection()
                    .map(|c| c.chain_id)
                    .unwrap_or(state.chain_id))
            }
            Self::Fixed(id) => Ok(*id),
        }
    }
}

/// Runs a tick closure on its own thread until stopped or dropped.
#[derive(Debug)]
pub struct Watcher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    /// The first tick runs immediately.
    pub fn spawn<F>(name: &str, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let spawned = thread::Builder::new()
            .name(format!("watch-{name}"))
            .spawn(move || loop {
                tick();
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            });
        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(watcher = name, error = %e, "failed to spawn watcher thread");
                None
            }
        };
        Self {
            stop: Some(stop),
            handle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the thread and waits for the in-flight tick to finish.
    pub fn stop(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("watcher thread panicked");
            }
        }
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        // Signal only; joining here could block the caller on a slow request.
        self.stop.take();
    }
}

/// Calls `on_block` whenever the block number on `chain` changes.
pub fn watch_block_number<F>(
    config: Arc<Config>,
    chain: ChainSelector,
    interval: Duration,
    mut on_block: F,
) -> Watcher
where
    F: FnMut(u64) + Send + 'static,
{
    let mut last: Option<(u64, u64)> = None;
    Watcher::spawn("block-number", interval, move || {
        let result = chain
            .resolve(&config)
            .and_then(|id| actions::get_block_number(&config, Some(id)).map(|n| (id, n)));
        match result {
            Ok(current) if last != Some(current) => {
                last = Some(current);
                on_block(current.1);
            }
            Ok(_) => {}
            Err(e) => debug!(?chain, error = %e, "block number poll failed"),
        }
    })
}

/// Calls `on_balance` whenever the current account's balance on `chain`
/// changes; `None` once no account is connected.
pub fn watch_balance<F>(
    config: Arc<Config>,
    chain: ChainSelector,
    interval: Duration,
    mut on_balance: F,
) -> Watcher
where
    F: FnMut(Option<Balance>) + Send + 'static,
{
    let mut last: Option<Option<Balance>> = None;
    Watcher::spawn("balance", interval, move || {
        let result = actions::get_account(&config).and_then(|account| match account.address {
            Some(address) => {
                let id = chain.resolve(&config)?;
                actions::get_balance(&config, address, Some(id)).map(Some)
            }
            None => Ok(None),
        });
        match result {
            Ok(balance) if last.as_ref() != Some(&balance) => {
                last = Some(balance.clone());
                on_balance(balance);
            }
            Ok(_) => {}
            Err(e) => debug!(?chain, error = %e, "balance poll failed"),
        }
    })
}
