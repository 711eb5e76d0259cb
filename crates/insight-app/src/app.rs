//! Main egui application: composes the panels and drives the session
//! controller and history archive.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, TopBottomPanel};

use insight_core::archive::HistoryArchive;
use insight_core::controller::SessionController;
use insight_core::event_bus::EventBus;
use insight_core::ports::{ClockPort, StoragePort};
use insight_platform::clock::BrowserClock;
use insight_platform::engine::engine_from_config;
use insight_platform::storage::{auto_detect_storage, open_storage, MemoryStorage};
use insight_types::config::{InsightConfig, StorageBackendType};
use insight_types::session::{HistoricalSession, HistorySummary};
use insight_ui::panels::assistant::{self, AssistantAction};
use insight_ui::panels::history::{self, HistoryAction};
use insight_ui::panels::settings::{self, SaveFeedback, SettingsAction};
use insight_ui::state::{UiState, View};
use insight_ui::theme;

use crate::config_store::{load_config, save_config};

/// Results of background tasks, applied on the next frame
enum Completion {
    Booted {
        config: Option<InsightConfig>,
        settings_store: Rc<dyn StoragePort>,
        archive_store: Rc<dyn StoragePort>,
    },
    History(Vec<HistorySummary>),
    Loaded(HistoricalSession),
    ConfigSaved,
    Failed(String),
}

type Inbox = Rc<RefCell<Vec<Completion>>>;

/// The main application state
pub struct InsightApp {
    ui_state: UiState,
    config: InsightConfig,
    event_bus: EventBus,
    clock: Rc<dyn ClockPort>,
    controller: Rc<SessionController>,
    /// Where the configuration lives; set once storage is open
    settings_store: Option<Rc<dyn StoragePort>>,
    archive: Option<Rc<HistoryArchive>>,
    inbox: Inbox,
    save_feedback: Option<SaveFeedback>,
    first_frame: bool,
}

impl InsightApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = InsightConfig::default();
        let event_bus = EventBus::new();
        let clock: Rc<dyn ClockPort> = Rc::new(BrowserClock::new());
        let controller = SessionController::new(
            engine_from_config(&config.engine),
            clock.clone(),
            event_bus.clone(),
            config.engine.timeout_ms,
        );

        let app = Self {
            ui_state: UiState::new(&config),
            config,
            event_bus,
            clock,
            controller: Rc::new(controller),
            settings_store: None,
            archive: None,
            inbox: Rc::new(RefCell::new(Vec::new())),
            save_feedback: None,
            first_frame: true,
        };
        app.boot();
        app
    }

    /// Open storage, restore the saved configuration, then open the
    /// archive backend the configuration names.
    fn boot(&self) {
        let inbox = self.inbox.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let settings_store = match auto_detect_storage().await {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("Storage unavailable ({}), using memory", e);
                    Rc::new(MemoryStorage::new())
                }
            };
            let config = load_config(settings_store.as_ref()).await.unwrap_or_else(|e| {
                log::warn!("Cannot read stored config: {}", e);
                None
            });

            let backend = config
                .as_ref()
                .map(|c| c.storage.backend.clone())
                .unwrap_or(StorageBackendType::Auto);
            let archive_store = if backend == StorageBackendType::Auto {
                settings_store.clone()
            } else {
                match open_storage(&backend).await {
                    Ok(s) => s,
                    Err(e) => {
                        log::warn!("Configured storage unavailable ({}), using {}", e, settings_store.backend_name());
                        settings_store.clone()
                    }
                }
            };

            inbox.borrow_mut().push(Completion::Booted {
                config,
                settings_store,
                archive_store,
            });
        });
    }

    /// Push the current configuration into the controller.
    fn apply_config(&self) {
        self.controller.replace_engine(engine_from_config(&self.config.engine));
        self.controller.set_timeout_ms(self.config.engine.timeout_ms);
    }

    fn drain_inbox(&mut self) -> bool {
        let completions: Vec<Completion> = self.inbox.borrow_mut().drain(..).collect();
        let changed = !completions.is_empty();
        for completion in completions {
            match completion {
                Completion::Booted {
                    config,
                    settings_store,
                    archive_store,
                } => {
                    if let Some(config) = config {
                        self.config = config;
                        self.apply_config();
                        if self.ui_state.active.is_none() {
                            self.ui_state.brand_choice = self.config.resolved_default_brand();
                        }
                    }
                    let archive = HistoryArchive::new(archive_store, self.clock.clone(), self.event_bus.clone())
                        .with_title_max_chars(self.config.title_max_chars);
                    log::info!("Chat logs stored in {}", archive.backend_name());
                    self.archive = Some(Rc::new(archive));
                    self.settings_store = Some(settings_store);
                    self.ui_state.history_stale = true;
                }
                Completion::History(summaries) => self.ui_state.set_history(summaries),
                Completion::Loaded(record) => self.ui_state.show_archived(&record),
                Completion::ConfigSaved => {
                    self.save_feedback = Some(SaveFeedback {
                        message: "Settings saved".to_string(),
                        success: true,
                    });
                }
                Completion::Failed(message) => {
                    self.ui_state.status_text = message;
                }
            }
        }
        changed
    }
}

impl eframe::App for InsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        let mut dirty = self.drain_inbox();
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            dirty = true;
        }
        dirty |= self.ui_state.refresh(&self.controller, &self.config);
        if dirty {
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() || self.archive.is_none() {
            ctx.request_repaint();
        }

        if self.ui_state.view == View::ChatLogs && self.ui_state.history_stale {
            self.reload_history(ctx);
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Brand Insight").strong().color(theme::ACCENT).size(16.0));
                ui.separator();
                for (view, label) in [
                    (View::Assistant, "Assistant"),
                    (View::ChatLogs, "Chat Logs"),
                    (View::Settings, "Settings"),
                ] {
                    if ui.selectable_label(self.ui_state.view == view, label).clicked() {
                        self.ui_state.view = view;
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let storage = self
                        .archive
                        .as_ref()
                        .map(|a| a.backend_name().to_string())
                        .unwrap_or_else(|| "opening storage...".to_string());
                    ui.label(RichText::new(storage).color(theme::TEXT_SECONDARY).small());
                });
            });
        });

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| match self.ui_state.view {
            View::Assistant => {
                if let Some(action) = assistant::assistant_panel(ui, &mut self.ui_state, &self.config) {
                    self.dispatch_assistant(action, ctx);
                }
            }
            View::ChatLogs => {
                if let Some(action) = history::history_panel(ui, &self.ui_state) {
                    self.dispatch_history(action, ctx);
                }
            }
            View::Settings => {
                match settings::settings_panel(ui, &mut self.config, self.save_feedback.as_ref()) {
                    SettingsAction::None => {}
                    SettingsAction::Changed => self.save_feedback = None,
                    SettingsAction::SaveClicked => self.save_settings(ctx),
                }
            }
        });
    }
}

impl InsightApp {
    fn dispatch_assistant(&mut self, action: AssistantAction, ctx: &egui::Context) {
        match action {
            AssistantAction::Open(brand) => {
                if let Err(e) = self.controller.open(Some(brand)) {
                    self.ui_state.status_text = e.to_string();
                }
            }
            AssistantAction::Submit(prompt) => {
                let Some(handle) = self.ui_state.active else {
                    return;
                };
                let controller = self.controller.clone();
                let inbox = self.inbox.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = controller.submit(handle, &prompt).await {
                        log::error!("Submit on session {} failed: {}", handle, e);
                        inbox.borrow_mut().push(Completion::Failed(e.to_string()));
                    }
                    ctx.request_repaint();
                });
            }
            AssistantAction::Archive => self.archive_active(ctx),
            AssistantAction::Close => {
                if let Some(handle) = self.ui_state.active {
                    if let Err(e) = self.controller.close(handle) {
                        log::warn!("Close of session {} failed: {}", handle, e);
                    }
                }
            }
        }
    }

    fn archive_active(&mut self, ctx: &egui::Context) {
        let (Some(handle), Some(archive)) = (self.ui_state.active, self.archive.clone()) else {
            self.ui_state.status_text = "Chat logs are not available yet".to_string();
            return;
        };
        let session = match self.controller.session(handle) {
            Ok(s) => s,
            Err(e) => {
                self.ui_state.status_text = e.to_string();
                return;
            }
        };
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = archive.save(&session).await {
                inbox.borrow_mut().push(Completion::Failed(e.to_string()));
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_history(&mut self, action: HistoryAction, ctx: &egui::Context) {
        match action {
            HistoryAction::Reload => self.reload_history(ctx),
            HistoryAction::Select(id) => {
                let Some(archive) = self.archive.clone() else {
                    return;
                };
                let inbox = self.inbox.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let completion = match archive.get(&id).await {
                        Ok(record) => Completion::Loaded(record),
                        Err(e) => Completion::Failed(e.to_string()),
                    };
                    inbox.borrow_mut().push(completion);
                    ctx.request_repaint();
                });
            }
        }
    }

    fn reload_history(&mut self, ctx: &egui::Context) {
        let Some(archive) = self.archive.clone() else {
            return;
        };
        // cleared now so the next frame doesn't spawn a second load
        self.ui_state.history_stale = false;
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let completion = match archive.list().await {
                Ok(summaries) => Completion::History(summaries),
                Err(e) => Completion::Failed(e.to_string()),
            };
            inbox.borrow_mut().push(completion);
            ctx.request_repaint();
        });
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        self.apply_config();
        let Some(storage) = self.settings_store.clone() else {
            self.save_feedback = Some(SaveFeedback {
                message: "Storage not ready, settings applied for this visit only".to_string(),
                success: false,
            });
            return;
        };
        let config = self.config.clone();
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let completion = match save_config(storage.as_ref(), &config).await {
                Ok(()) => Completion::ConfigSaved,
                Err(e) => Completion::Failed(format!("Saving settings failed: {}", e)),
            };
            inbox.borrow_mut().push(completion);
            ctx.request_repaint();
        });
    }
}
