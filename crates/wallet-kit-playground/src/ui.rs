//! UI helper components

use eframe::egui;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 170);
const ERROR: egui::Color32 = egui::Color32::from_rgb(230, 90, 90);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// `label: value` row, value in monospace; empty values render as nothing.
pub fn labeled_value(ui: &mut egui::Ui, label: &str, value: Option<String>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        if let Some(value) = value {
            ui.label(egui::RichText::new(value).monospace());
        }
    });
}

pub fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(ERROR));
}

/// Monospace value with a copy button; returns true when copied.
pub fn value_with_copy(ui: &mut egui::Ui, value: &str) -> bool {
    let mut copied = false;
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(value).monospace());
        if ui
            .small_button("📋")
            .on_hover_text("Copy to clipboard")
            .clicked()
        {
            copy_to_clipboard(value);
            copied = true;
        }
    });
    copied
}

pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!(error = %e, "clipboard write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
    }
}
