//! The eight playground panels, top to bottom.
//!
//! Panels only render; anything that touches a wallet is returned as a
//! [`PanelAction`] for the app to run off the UI thread.

use alloy::primitives::Address;
use eframe::egui;

use wallet_kit_core::{AccountSnapshot, Balance, Chain, Connection, ConnectionStatus, ConnectorInfo};

use crate::ui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Connect(String),
    Disconnect,
    SwitchAccount(String),
    SwitchChain(u64),
    SignMessage(String),
}

/// Lifecycle of the last request a panel issued.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

impl MutationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error(_) => "error",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One reading per chain selector: read chain, account chain, Optimism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReadings<T> {
    pub default: Option<T>,
    pub account: Option<T>,
    pub optimism: Option<T>,
}

impl<T> Default for ChainReadings<T> {
    fn default() -> Self {
        Self {
            default: None,
            account: None,
            optimism: None,
        }
    }
}

pub fn accounts_json(accounts: &[Address]) -> String {
    serde_json::to_string(accounts).unwrap_or_else(|_| "[]".to_owned())
}

pub fn account(ui: &mut egui::Ui, account: &AccountSnapshot) -> Option<PanelAction> {
    ui::styled_heading(ui, "Account");
    ui::labeled_value(ui, "account", account.address.map(|a| a.to_string()));
    ui::labeled_value(ui, "chainId", account.chain_id.map(|id| id.to_string()));
    ui::labeled_value(ui, "status", Some(account.status.to_string()));

    let mut action = None;
    if account.status == ConnectionStatus::Connected && ui.button("Disconnect").clicked() {
        action = Some(PanelAction::Disconnect);
    }
    action
}

pub fn connect(
    ui: &mut egui::Ui,
    connectors: &[ConnectorInfo],
    status: &MutationStatus,
) -> Option<PanelAction> {
    ui::styled_heading(ui, "Connect");
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for connector in connectors {
            let button = egui::Button::new(connector.name.as_str());
            if ui.add_enabled(!status.is_pending(), button).clicked() {
                action = Some(PanelAction::Connect(connector.uid.clone()));
            }
        }
    });
    ui.label(status.label());
    if let Some(message) = status.error() {
        ui::error_label(ui, message);
    }
    action
}

/// Buttons for every connected wallet; the current one is disabled.
pub fn switch_account(
    ui: &mut egui::Ui,
    account: &AccountSnapshot,
    connections: &[Connection],
) -> Option<PanelAction> {
    ui::styled_heading(ui, "Switch Account");
    let current = account.connector.as_ref().map(|c| c.uid.as_str());
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for connection in connections {
            let info = &connection.connector;
            let enabled = current != Some(info.uid.as_str());
            if ui
                .add_enabled(enabled, egui::Button::new(info.name.as_str()))
                .clicked()
            {
                action = Some(PanelAction::SwitchAccount(info.uid.clone()));
            }
        }
    });
    action
}

pub fn switch_chain(
    ui: &mut egui::Ui,
    chains: &[Chain],
    account: &AccountSnapshot,
    status: &MutationStatus,
) -> Option<PanelAction> {
    ui::styled_heading(ui, "Switch Chain");
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for chain in chains {
            let enabled = account.chain_id != Some(chain.id) && !status.is_pending();
            if ui
                .add_enabled(enabled, egui::Button::new(chain.name.as_str()))
                .clicked()
            {
                action = Some(PanelAction::SwitchChain(chain.id));
            }
        }
    });
    if let Some(message) = status.error() {
        ui::error_label(ui, message);
    }
    action
}

pub fn sign_message(
    ui: &mut egui::Ui,
    draft: &mut String,
    status: &MutationStatus,
    signature: Option<&str>,
) -> Option<PanelAction> {
    ui::styled_heading(ui, "Sign Message");
    let mut action = None;
    ui.horizontal(|ui| {
        let input = ui.text_edit_singleline(draft);
        let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(!status.is_pending(), egui::Button::new("Sign Message"))
            .clicked();
        if clicked || (submitted && !status.is_pending()) {
            action = Some(PanelAction::SignMessage(draft.clone()));
        }
    });
    if let Some(signature) = signature {
        ui::value_with_copy(ui, signature);
    }
    if let Some(message) = status.error() {
        ui::error_label(ui, message);
    }
    action
}

pub fn connections(ui: &mut egui::Ui, connections: &[Connection]) {
    ui::styled_heading(ui, "Connections");
    for connection in connections {
        ui.group(|ui| {
            ui.label(format!("connector {}", connection.connector.name));
            ui.label(format!("accounts: {}", accounts_json(&connection.accounts)));
            ui.label(format!("chainId: {}", connection.chain_id));
        });
    }
}

pub fn balance(ui: &mut egui::Ui, balances: &ChainReadings<Balance>) {
    ui::styled_heading(ui, "Balance");
    let formatted = |b: &Option<Balance>| b.as_ref().map(|b| b.formatted.clone());
    ui::labeled_value(ui, "Balance (Default Chain)", formatted(&balances.default));
    ui::labeled_value(ui, "Balance (Account Chain)", formatted(&balances.account));
    ui::labeled_value(ui, "Balance (Optimism Chain)", formatted(&balances.optimism));
}

pub fn block_number(ui: &mut egui::Ui, blocks: &ChainReadings<u64>) {
    ui::styled_heading(ui, "Block Number");
    let text = |n: Option<u64>| n.map(|n| n.to_string());
    ui::labeled_value(ui, "Block Number (Default Chain)", text(blocks.default));
    ui::labeled_value(ui, "Block Number (Account Chain)", text(blocks.account));
    ui::labeled_value(ui, "Block Number (Optimism)", text(blocks.optimism));
}
