//! Rendering of a projected conversation, shared by the assistant panel
//! and the chat logs detail pane.

use egui::{self, Color32, RichText, ScrollArea};
use crate::projection::{AnswerCard, RenderModel, RenderRow, TableView};
use crate::theme::*;

/// Render every row of `model`. Returns the follow-up the user clicked,
/// if any; read-only models never return one.
pub fn render_rows(ui: &mut egui::Ui, model: &RenderModel) -> Option<String> {
    if model.read_only {
        ui.label(RichText::new("Archived conversation, read only").color(TEXT_SECONDARY).small());
        ui.add_space(4.0);
    }
    let clickable = model.accepts_input && !model.read_only;
    let mut clicked = None;
    for (idx, row) in model.rows.iter().enumerate() {
        ui.push_id(idx, |ui| match row {
            RenderRow::UserBubble { text } => user_bubble(ui, text),
            RenderRow::Loading => loading(ui),
            RenderRow::AnswerCard(card) => {
                if let Some(s) = answer_card(ui, card, clickable) {
                    clicked = Some(s);
                }
            }
            RenderRow::ErrorPanel { title, message } => error_panel(ui, title, message),
        });
        ui.add_space(6.0);
    }
    clicked
}

fn user_bubble(ui: &mut egui::Ui, text: &str) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
        egui::Frame::default()
            .fill(USER_BUBBLE)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.label(RichText::new(text).color(TEXT_PRIMARY));
            });
    });
}

fn loading(ui: &mut egui::Ui) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Analyzing data...").color(TEXT_SECONDARY));
            });
        });
}

fn error_panel(ui: &mut egui::Ui, title: &str, message: &str) {
    egui::Frame::default()
        .fill(ERROR_BG)
        .stroke(egui::Stroke::new(1.0, ERROR))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).color(ERROR).strong());
            ui.label(RichText::new(message).color(TEXT_PRIMARY));
        });
}

fn answer_card(ui: &mut egui::Ui, card: &AnswerCard, clickable: bool) -> Option<String> {
    let mut clicked = None;
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.label(RichText::new(&card.summary).color(TEXT_PRIMARY));
            ui.add_space(6.0);

            egui::Frame::default()
                .fill(BG_SURFACE)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    let kf = &card.key_finding;
                    ui.label(RichText::new(&kf.title).color(TEXT_SECONDARY).small());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&kf.value).color(TEXT_PRIMARY).strong().size(18.0));
                        ui.label(RichText::new(&kf.change).color(change_color(&kf.change)));
                    });
                });

            if let Some(table) = &card.table {
                ui.add_space(6.0);
                supporting_table(ui, table);
            }

            if !card.recommendations.is_empty() {
                ui.add_space(6.0);
                ui.label(RichText::new("Recommendations").color(ACCENT).strong());
                for rec in &card.recommendations {
                    egui::Frame::default()
                        .stroke(egui::Stroke::new(1.0, BG_SURFACE))
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(6.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&rec.title).color(TEXT_PRIMARY).strong());
                            ui.label(RichText::new(&rec.description).color(TEXT_SECONDARY));
                        });
                }
            }

            if !card.suggestions.is_empty() {
                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    for suggestion in &card.suggestions {
                        let chip = egui::Button::new(RichText::new(suggestion).color(TEXT_PRIMARY).small())
                            .fill(Color32::TRANSPARENT)
                            .stroke(egui::Stroke::new(1.0, ACCENT))
                            .corner_radius(BUBBLE_ROUNDING);
                        if ui.add_enabled(clickable, chip).clicked() {
                            clicked = Some(suggestion.clone());
                        }
                    }
                });
            }
        });
    clicked
}

fn supporting_table(ui: &mut egui::Ui, table: &TableView) {
    ScrollArea::horizontal().show(ui, |ui| {
        egui::Grid::new("supporting_table")
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for column in &table.columns {
                    ui.label(RichText::new(&column.label).color(TABLE_HEADER).strong());
                }
                ui.end_row();
                for row in &table.rows {
                    for cell in row {
                        ui.label(RichText::new(cell).color(TEXT_PRIMARY));
                    }
                    ui.end_row();
                }
            });
    });
}
