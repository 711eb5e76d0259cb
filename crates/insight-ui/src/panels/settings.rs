//! Settings panel: analysis engine, default brand and storage backend,
//! with an explicit Save button and visual feedback.

use egui::{self, RichText, Vec2};
use insight_types::config::{InsightConfig, StorageBackendType};
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// A field was edited; applied in memory only
    Changed,
    /// Persist and apply the configuration
    SaveClicked,
}

/// Save feedback passed in from the app layer
#[derive(Debug, Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut InsightConfig,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Analysis Engine ──────────────────────────────
            ui.label(RichText::new("Analysis Engine").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Endpoint").color(TEXT_SECONDARY).small());
            let mut endpoint = config.engine.endpoint.clone().unwrap_or_default();
            if ui
                .add(egui::TextEdit::singleline(&mut endpoint).hint_text("https://analysis.example.com"))
                .changed()
            {
                config.engine.endpoint = endpoint_value(&endpoint);
                changed = true;
            }
            if config.engine.endpoint.is_none() {
                ui.label(
                    RichText::new("No endpoint: questions fail until one is set.")
                        .color(WARNING)
                        .small()
                        .italics(),
                );
            }

            ui.add_space(4.0);
            ui.label(RichText::new("API Key").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::TextEdit::singleline(&mut config.engine.api_key).password(true))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);
            ui.label(RichText::new("Timeout (ms)").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::Slider::new(&mut config.engine.timeout_ms, 1_000..=120_000).step_by(1_000.0))
                .changed()
            {
                changed = true;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Brand ────────────────────────────────────────
            ui.label(RichText::new("Default Brand").color(ACCENT).strong());
            ui.add_space(2.0);
            let selected = config
                .default_brand
                .as_ref()
                .map(|b| b.to_string())
                .unwrap_or_else(|| "None".to_string());
            let brands = config.brands.clone();
            egui::ComboBox::from_id_salt("default_brand")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui.selectable_value(&mut config.default_brand, None, "None").changed() {
                        changed = true;
                    }
                    for brand in brands {
                        let label = brand.to_string();
                        if ui
                            .selectable_value(&mut config.default_brand, Some(brand), label)
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Storage ──────────────────────────────────────
            ui.label(RichText::new("Storage").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Backend").color(TEXT_SECONDARY).small());
            egui::ComboBox::from_id_salt("storage_backend")
                .selected_text(storage_label(&config.storage.backend))
                .show_ui(ui, |ui| {
                    for backend in [
                        StorageBackendType::Auto,
                        StorageBackendType::Memory,
                        StorageBackendType::IndexedDb,
                    ] {
                        let label = storage_label(&backend);
                        if ui
                            .selectable_value(&mut config.storage.backend, backend, label)
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new(storage_description(&config.storage.backend))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            // ── Save ─────────────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Save Settings").color(TEXT_PRIMARY).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

/// Blank input clears the endpoint.
pub fn endpoint_value(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn storage_label(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "Auto-detect",
        StorageBackendType::Memory => "Memory",
        StorageBackendType::IndexedDb => "IndexedDB",
    }
}

fn storage_description(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "Tries IndexedDB first, falls back to Memory. Applies on next start.",
        StorageBackendType::Memory => "Volatile. Chat logs are lost on page reload.",
        StorageBackendType::IndexedDb => "Persistent browser storage. Chat logs survive reloads. Applies on next start.",
    }
}
