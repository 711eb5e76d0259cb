//! Chat logs: archived conversations on the left, the selected one
//! rendered read-only on the right.

use egui::{self, RichText, ScrollArea, SidePanel};
use insight_types::session::HistorySummary;

use crate::panels::conversation::render_rows;
use crate::state::UiState;
use crate::theme::*;

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    Reload,
    Select(String),
}

pub fn history_panel(ui: &mut egui::Ui, state: &UiState) -> Option<HistoryAction> {
    let mut action = None;

    SidePanel::left("chat_logs_list")
        .resizable(true)
        .default_width(260.0)
        .show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Chat Logs").color(TEXT_PRIMARY));
                if ui.small_button("Reload").clicked() {
                    action = Some(HistoryAction::Reload);
                }
            });
            ui.separator();

            if state.history.is_empty() {
                ui.label(RichText::new("No saved conversations yet").color(TEXT_SECONDARY).italics());
                return;
            }

            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                for summary in &state.history {
                    let is_selected = state.selected.as_ref().is_some_and(|s| s.id == summary.id);
                    if history_row(ui, summary, is_selected) {
                        action = Some(HistoryAction::Select(summary.id.clone()));
                    }
                }
            });
        });

    egui::CentralPanel::default().show_inside(ui, |ui| match &state.selected {
        None => {
            ui.label(RichText::new("Select a conversation to review it").color(TEXT_SECONDARY));
        }
        Some(selected) => {
            ui.heading(RichText::new(&selected.title).color(TEXT_PRIMARY));
            ui.label(RichText::new(&selected.model.brand).color(ACCENT).small());
            ui.separator();
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                let _ = render_rows(ui, &selected.model);
            });
        }
    });

    action
}

fn history_row(ui: &mut egui::Ui, summary: &HistorySummary, selected: bool) -> bool {
    let fill = if selected { BG_SURFACE } else { BG_SECONDARY };
    let response = egui::Frame::default()
        .fill(fill)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&summary.title).color(TEXT_PRIMARY));
            ui.label(
                RichText::new(format!(
                    "{} · {} · {} turn(s)",
                    summary.brand,
                    summary.archived_at.format("%d %b %Y, %H:%M"),
                    summary.turn_count
                ))
                .color(TEXT_SECONDARY)
                .small(),
            );
        })
        .response
        .interact(egui::Sense::click());
    ui.add_space(4.0);
    response.clicked()
}
