//! Assistant panel: brand picker, conversation, suggestions and input.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use insight_types::{brand::BrandId, config::InsightConfig};

use crate::panels::conversation::render_rows;
use crate::state::UiState;
use crate::theme::*;

/// What the user asked the assistant panel to do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantAction {
    Open(BrandId),
    Submit(String),
    Archive,
    Close,
}

/// Render the assistant panel. Returns at most one action per frame.
pub fn assistant_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    config: &InsightConfig,
) -> Option<AssistantAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("AI Assistant").color(TEXT_PRIMARY).strong());
                    if let Some(model) = &state.model {
                        ui.label(RichText::new(&model.brand).color(ACCENT));
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if state.active.is_some() {
                            if ui.button("Close").clicked() {
                                action = Some(AssistantAction::Close);
                            }
                            if ui
                                .add_enabled(state.can_archive(), egui::Button::new("Save to chat logs"))
                                .clicked()
                            {
                                action = Some(AssistantAction::Archive);
                            }
                        }
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                if state.active.is_none() {
                    if let Some(a) = brand_picker(ui, state, config) {
                        action = Some(a);
                    }
                    return;
                }

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if let Some(model) = &state.model {
                            if let Some(s) = render_rows(ui, model) {
                                action = Some(AssistantAction::Submit(s));
                            }
                        }
                        if !state.starters.is_empty() {
                            ui.label(RichText::new("Try asking").color(TEXT_SECONDARY).small());
                            for prompt in &state.starters {
                                if ui.button(prompt).clicked() {
                                    action = Some(AssistantAction::Submit(prompt.clone()));
                                }
                            }
                        }
                    });

                ui.add_space(8.0);

                if let Some(text) = input_row(ui, state) {
                    action = Some(AssistantAction::Submit(text));
                }
            });
        });

    action
}

fn brand_picker(
    ui: &mut egui::Ui,
    state: &mut UiState,
    config: &InsightConfig,
) -> Option<AssistantAction> {
    ui.label(RichText::new("Choose a brand to start a conversation").color(TEXT_SECONDARY));
    ui.add_space(4.0);

    let selected = state
        .brand_choice
        .as_ref()
        .map(|b| b.to_string())
        .unwrap_or_else(|| "Select brand".to_string());
    egui::ComboBox::from_id_salt("assistant_brand")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for brand in &config.brands {
                ui.selectable_value(&mut state.brand_choice, Some(brand.clone()), brand.as_str());
            }
        });

    ui.add_space(4.0);
    let start = ui.add_enabled(
        state.brand_choice.is_some(),
        egui::Button::new(RichText::new("Start").color(TEXT_PRIMARY))
            .fill(ACCENT)
            .corner_radius(PANEL_ROUNDING),
    );
    match (&state.brand_choice, start.clicked()) {
        (Some(brand), true) => Some(AssistantAction::Open(brand.clone())),
        _ => None,
    }
}

fn input_row(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;
    ui.horizontal(|ui| {
        let busy = state.is_busy();
        let input = egui::TextEdit::singleline(&mut state.input_text)
            .hint_text("Ask about your campaigns...")
            .desired_width(ui.available_width() - 70.0)
            .font(egui::FontId::proportional(14.0));
        let response = ui.add_enabled(!busy, input);

        let send_enabled = !state.input_text.trim().is_empty() && !busy;
        let send_btn = ui.add_enabled(
            send_enabled,
            egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(60.0, 0.0)),
        );

        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if send_enabled && (enter || send_btn.clicked()) {
            submitted = Some(state.input_text.trim().to_string());
            state.input_text.clear();
            response.request_focus();
        }
    });
    submitted
}
