//! Main application state and update loop

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::hex;
use eframe::egui;
use tracing::{debug, warn};

use wallet_kit_core::chains::OPTIMISM_CHAIN_ID;
use wallet_kit_core::watch::{watch_balance, watch_block_number};
use wallet_kit_core::{actions, ActionError, Balance, ChainSelector, Config, Subscription, Watcher};

use crate::panels::{self, ChainReadings, MutationStatus, PanelAction};

/// Result posted back by a worker thread
#[derive(Debug)]
enum ActionOutcome {
    Reconnect(Result<usize, String>),
    Connect(Result<(), String>),
    Disconnect(Result<(), String>),
    SwitchAccount(Result<(), String>),
    SwitchChain(Result<(), String>),
    SignMessage(Result<String, String>),
}

/// Latest values from the background watchers
#[derive(Debug, Default)]
struct Watched {
    blocks: ChainReadings<u64>,
    balances: ChainReadings<Balance>,
}

const WATCHED_CHAINS: [ChainSelector; 3] = [
    ChainSelector::Default,
    ChainSelector::Account,
    ChainSelector::Fixed(OPTIMISM_CHAIN_ID),
];

fn unit<T>(result: Result<T, ActionError>) -> Result<(), String> {
    result.map(|_| ()).map_err(|e| e.to_string())
}

fn reading_mut<T>(readings: &mut ChainReadings<T>, selector: ChainSelector) -> &mut Option<T> {
    match selector {
        ChainSelector::Default => &mut readings.default,
        ChainSelector::Account => &mut readings.account,
        ChainSelector::Fixed(_) => &mut readings.optimism,
    }
}

/// The main application state
pub struct App {
    config: Arc<Config>,
    watched: Arc<Mutex<Watched>>,
    outcomes: Arc<Mutex<Vec<ActionOutcome>>>,
    /// Dropping a watcher stops its thread.
    _watchers: Vec<Watcher>,
    subscription: Option<Subscription>,
    connect_status: MutationStatus,
    switch_chain_status: MutationStatus,
    sign_status: MutationStatus,
    /// Errors from disconnect / switch account, shown under the account panel
    account_error: Option<String>,
    signature: Option<String>,
    message_draft: String,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Arc<Config>,
        polling_interval: Duration,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();

        let repaint = ctx.clone();
        let subscription = match config.subscribe(move |_| repaint.request_repaint()) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "state subscription failed");
                None
            }
        };

        let watched = Arc::new(Mutex::new(Watched::default()));
        let watchers = spawn_watchers(&config, polling_interval, &watched, &ctx);

        let app = Self {
            config,
            watched,
            outcomes: Arc::new(Mutex::new(Vec::new())),
            _watchers: watchers,
            subscription,
            connect_status: MutationStatus::Idle,
            switch_chain_status: MutationStatus::Idle,
            sign_status: MutationStatus::Idle,
            account_error: None,
            signature: None,
            message_draft: String::new(),
        };

        // Restore still-authorized wallets, like a page reload would
        app.run_in_background(&ctx, |config| {
            ActionOutcome::Reconnect(
                actions::reconnect(config)
                    .map(|restored| restored.len())
                    .map_err(|e| e.to_string()),
            )
        });
        app
    }

    fn run_in_background<F>(&self, ctx: &egui::Context, job: F)
    where
        F: FnOnce(&Config) -> ActionOutcome + Send + 'static,
    {
        let config = Arc::clone(&self.config);
        let outcomes = Arc::clone(&self.outcomes);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = job(&config);
            debug!(?outcome, "background action finished");
            match outcomes.lock() {
                Ok(mut g) => g.push(outcome),
                Err(e) => warn!(error = %e, "outcome queue poisoned"),
            }
            ctx.request_repaint();
        });
    }

    fn dispatch(&mut self, ctx: &egui::Context, action: PanelAction) {
        match action {
            PanelAction::Connect(uid) => {
                self.connect_status = MutationStatus::Pending;
                self.run_in_background(ctx, move |config| {
                    ActionOutcome::Connect(unit(actions::connect(config, &uid, None)))
                });
            }
            PanelAction::Disconnect => {
                self.account_error = None;
                self.run_in_background(ctx, move |config| {
                    ActionOutcome::Disconnect(unit(actions::disconnect(config, None)))
                });
            }
            PanelAction::SwitchAccount(uid) => {
                self.account_error = None;
                self.run_in_background(ctx, move |config| {
                    ActionOutcome::SwitchAccount(unit(actions::switch_account(config, &uid)))
                });
            }
            PanelAction::SwitchChain(chain_id) => {
                self.switch_chain_status = MutationStatus::Pending;
                self.run_in_background(ctx, move |config| {
                    ActionOutcome::SwitchChain(unit(actions::switch_chain(config, chain_id)))
                });
            }
            PanelAction::SignMessage(message) => {
                self.sign_status = MutationStatus::Pending;
                self.run_in_background(ctx, move |config| {
                    ActionOutcome::SignMessage(
                        actions::sign_message(config, message.as_bytes(), None)
                            .map(|sig| hex::encode_prefixed(&sig))
                            .map_err(|e| e.to_string()),
                    )
                });
            }
        }
    }

    fn apply_outcomes(&mut self) {
        let drained = match self.outcomes.lock() {
            Ok(mut g) => std::mem::take(&mut *g),
            Err(e) => {
                warn!(error = %e, "outcome queue poisoned");
                return;
            }
        };
        let status = |r: Result<(), String>| match r {
            Ok(()) => MutationStatus::Success,
            Err(e) => MutationStatus::Error(e),
        };
        for outcome in drained {
            match outcome {
                ActionOutcome::Reconnect(Ok(restored)) => {
                    debug!(restored, "reconnect finished");
                }
                ActionOutcome::Reconnect(Err(e))
                | ActionOutcome::Disconnect(Err(e))
                | ActionOutcome::SwitchAccount(Err(e)) => self.account_error = Some(e),
                ActionOutcome::Disconnect(Ok(())) | ActionOutcome::SwitchAccount(Ok(())) => {}
                ActionOutcome::Connect(r) => self.connect_status = status(r),
                ActionOutcome::SwitchChain(r) => self.switch_chain_status = status(r),
                ActionOutcome::SignMessage(Ok(signature)) => {
                    self.signature = Some(signature);
                    self.sign_status = MutationStatus::Success;
                }
                ActionOutcome::SignMessage(Err(e)) => {
                    self.signature = None;
                    self.sign_status = MutationStatus::Error(e);
                }
            }
        }
    }

    fn render_panels(&mut self, ui: &mut egui::Ui) -> Vec<PanelAction> {
        let state = match self.config.state() {
            Ok(state) => state,
            Err(e) => {
                crate::ui::error_label(ui, &e.to_string());
                return Vec::new();
            }
        };
        let account = actions::account_from_state(&state);
        let connectors = actions::connectors(&self.config);
        let (blocks, balances) = match self.watched.lock() {
            Ok(g) => (g.blocks.clone(), g.balances.clone()),
            Err(_) => (ChainReadings::default(), ChainReadings::default()),
        };

        let mut requested = Vec::new();
        requested.extend(panels::account(ui, &account));
        if let Some(message) = &self.account_error {
            crate::ui::error_label(ui, message);
        }
        ui.separator();
        requested.extend(panels::connect(ui, &connectors, &self.connect_status));
        ui.separator();
        requested.extend(panels::switch_account(ui, &account, &state.connections));
        ui.separator();
        requested.extend(panels::switch_chain(
            ui,
            self.config.chains(),
            &account,
            &self.switch_chain_status,
        ));
        ui.separator();
        requested.extend(panels::sign_message(
            ui,
            &mut self.message_draft,
            &self.sign_status,
            self.signature.as_deref(),
        ));
        ui.separator();
        panels::connections(ui, &state.connections);
        ui.separator();
        panels::balance(ui, &balances);
        ui.separator();
        panels::block_number(ui, &blocks);
        requested
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.apply_outcomes();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(
                egui::RichText::new("Wallet Kit Playground")
                    .size(22.0)
                    .color(egui::Color32::from_rgb(0, 212, 170)),
            );
            ui.add_space(4.0);
        });

        let mut requested = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                requested = self.render_panels(ui);
            });
        });

        for action in requested {
            self.dispatch(ctx, action);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            if let Err(e) = self.config.unsubscribe(subscription) {
                warn!(error = %e, "failed to remove state subscription");
            }
        }
    }
}

fn spawn_watchers(
    config: &Arc<Config>,
    interval: Duration,
    watched: &Arc<Mutex<Watched>>,
    ctx: &egui::Context,
) -> Vec<Watcher> {
    let mut watchers = Vec::with_capacity(WATCHED_CHAINS.len() * 2);
    for selector in WATCHED_CHAINS {
        let (slot, repaint) = (Arc::clone(watched), ctx.clone());
        watchers.push(watch_block_number(
            Arc::clone(config),
            selector,
            interval,
            move |number| {
                if let Ok(mut g) = slot.lock() {
                    *reading_mut(&mut g.blocks, selector) = Some(number);
                }
                repaint.request_repaint();
            },
        ));

        let (slot, repaint) = (Arc::clone(watched), ctx.clone());
        watchers.push(watch_balance(
            Arc::clone(config),
            selector,
            interval,
            move |balance| {
                if let Ok(mut g) = slot.lock() {
                    *reading_mut(&mut g.balances, selector) = balance;
                }
                repaint.request_repaint();
            },
        ));
    }
    watchers
}
