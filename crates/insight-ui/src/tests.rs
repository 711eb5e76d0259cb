#[cfg(test)]
mod tests {
    use crate::panels::settings::{endpoint_value, storage_label};
    use crate::projection::*;
    use crate::state::*;
    use crate::theme::change_color;
    use crate::theme::{ERROR, SUCCESS, TEXT_SECONDARY};

    use insight_core::controller::{SessionController, SessionState};
    use insight_core::event_bus::EventBus;
    use insight_core::ports::{AnalysisEnginePort, AnalysisRequest, ClockPort};
    use insight_types::analysis::AnalysisResult;
    use insight_types::brand::BrandId;
    use insight_types::config::{InsightConfig, StorageBackendType};
    use insight_types::entry::AssistantPayload;
    use insight_types::event::{SessionEvent, TurnStatus};
    use insight_types::session::{HistoricalSession, Session, SessionHandle};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::Rc;

    fn brand() -> BrandId {
        BrandId::parse("BRImo").unwrap()
    }

    fn result_from(value: serde_json::Value) -> AnalysisResult {
        serde_json::from_value(value).unwrap()
    }

    fn campaign_result() -> AnalysisResult {
        result_from(json!({
            "summary": "Summer Sale led conversions.",
            "keyFinding": { "title": "Top Campaign", "value": "1,286", "change": "+22%" },
            "supportingRows": [
                { "campaign": "Summer Sale", "avgTime": "2m 10s", "ctr": 0.042 },
                { "campaign": "Back to School", "conversions": 640 }
            ],
            "recommendations": [
                { "title": "Amplify", "description": "Shift 15% budget." }
            ],
            "followUpSuggestions": ["Break it down by age", "Compare with last month"]
        }))
    }

    fn answered(prompts: &[&str]) -> Session {
        let mut session = Session::new(brand(), Utc::now());
        for p in prompts {
            session.begin_turn(*p).unwrap();
            session
                .resolve_turn(AssistantPayload::Answer { result: campaign_result() })
                .unwrap();
        }
        session
    }

    // ─── Projection Tests ────────────────────────────────────

    #[test]
    fn test_project_empty_session() {
        let model = project(&Session::new(brand(), Utc::now()));
        assert!(model.rows.is_empty());
        assert!(model.accepts_input);
        assert!(!model.read_only);
        assert_eq!(model.brand, "BRImo");
    }

    #[test]
    fn test_project_pending_is_loading() {
        let mut session = Session::new(brand(), Utc::now());
        session.begin_turn("What is the top campaign?").unwrap();
        let model = project(&session);
        assert_eq!(
            model.rows,
            vec![
                RenderRow::UserBubble { text: "What is the top campaign?".to_string() },
                RenderRow::Loading,
            ]
        );
        assert!(!model.accepts_input);
    }

    #[test]
    fn test_project_answer_card() {
        let model = project(&answered(&["q"]));
        let RenderRow::AnswerCard(card) = &model.rows[1] else {
            panic!("expected answer card, got {:?}", model.rows[1]);
        };
        assert_eq!(card.summary, "Summer Sale led conversions.");
        assert_eq!(card.key_finding.value, "1,286");
        assert_eq!(card.recommendations[0].title, "Amplify");
        assert_eq!(card.suggestions.len(), 2);
    }

    #[test]
    fn test_project_failure_keeps_message_verbatim() {
        let mut session = Session::new(brand(), Utc::now());
        session.begin_turn("q").unwrap();
        let message = "HTTP 502: <html>Bad Gateway</html>\n  upstream=analysis-7";
        session
            .resolve_turn(AssistantPayload::Failure { message: message.to_string() })
            .unwrap();

        let model = project(&session);
        assert_eq!(
            model.rows[1],
            RenderRow::ErrorPanel {
                title: "Something went wrong".to_string(),
                message: message.to_string(),
            }
        );
        assert!(model.accepts_input);
    }

    #[test]
    fn test_project_is_pure_and_repeatable() {
        let session = answered(&["first", "second"]);
        let before = session.clone();
        let a = project(&session);
        let b = project(&session);
        assert_eq!(a, b);
        assert_eq!(session, before);
    }

    #[test]
    fn test_table_header_is_union_in_first_seen_order() {
        let table = build_table(&campaign_result().supporting_rows).unwrap();
        let keys: Vec<&str> = table.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["campaign", "avgTime", "ctr", "conversions"]);

        assert_eq!(table.rows[0], vec!["Summer Sale", "2m 10s", "0.042", ""]);
        assert_eq!(table.rows[1], vec!["Back to School", "", "", "640"]);
    }

    #[test]
    fn test_table_labels_are_humanized() {
        let table = build_table(&campaign_result().supporting_rows).unwrap();
        let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["campaign", "avg Time", "ctr", "conversions"]);
    }

    #[test]
    fn test_table_absent_without_rows() {
        assert!(build_table(&[]).is_none());
        let result = result_from(json!({
            "summary": "s",
            "keyFinding": { "title": "t", "value": "v", "change": "c" }
        }));
        let mut session = Session::new(brand(), Utc::now());
        session.begin_turn("q").unwrap();
        session.resolve_turn(AssistantPayload::Answer { result }).unwrap();
        let RenderRow::AnswerCard(card) = &project(&session).rows[1] else {
            panic!("expected answer card");
        };
        assert!(card.table.is_none());
        assert!(card.suggestions.is_empty());
    }

    #[test]
    fn test_humanize_label() {
        assert_eq!(humanize_label("avgTime"), "avg Time");
        assert_eq!(humanize_label("costPerLead"), "cost Per Lead");
        assert_eq!(humanize_label("ROAS"), "ROAS");
        assert_eq!(humanize_label("Campaign Name"), "Campaign Name");
        assert_eq!(humanize_label(""), "");
    }

    #[test]
    fn test_project_archived_is_read_only() {
        let session = answered(&["What is the top campaign?"]);
        let record = HistoricalSession::new(&session, "title".to_string(), Utc::now());
        let model = project_archived(&record);

        assert!(model.read_only);
        assert!(!model.accepts_input);
        let RenderRow::AnswerCard(card) = &model.rows[1] else {
            panic!("expected answer card");
        };
        assert!(card.suggestions.is_empty());
        assert!(card.table.is_some());
    }

    // ─── UiState Tests ───────────────────────────────────────

    struct InstantEngine;

    #[async_trait(?Send)]
    impl AnalysisEnginePort for InstantEngine {
        async fn ask(&self, _req: AnalysisRequest) -> insight_types::Result<AnalysisResult> {
            Ok(campaign_result())
        }

        fn engine_name(&self) -> &str {
            "instant"
        }
    }

    struct FixedClock;

    #[async_trait(?Send)]
    impl ClockPort for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }

        async fn sleep(&self, _ms: u64) {
            futures::future::pending::<()>().await;
        }
    }

    fn controller() -> (SessionController, EventBus) {
        let bus = EventBus::new();
        let controller =
            SessionController::new(Rc::new(InstantEngine), Rc::new(FixedClock), bus.clone(), 1_000);
        (controller, bus)
    }

    #[test]
    fn test_ui_state_initial() {
        let mut config = InsightConfig::default();
        config.default_brand = Some(BrandId::parse("KPR").unwrap());
        let state = UiState::new(&config);

        assert_eq!(state.view, View::Assistant);
        assert_eq!(state.brand_choice, config.default_brand);
        assert!(state.active.is_none());
        assert!(state.model.is_none());
        assert!(state.history_stale);
        assert_eq!(state.status_text, "Ready");
        assert!(!state.is_busy());
        assert_eq!(state.session_state(), None);
    }

    #[test]
    fn test_ui_state_default_brand_outside_catalog_ignored() {
        let mut config = InsightConfig::default();
        config.default_brand = Some(BrandId::parse("Unknown Brand").unwrap());
        assert!(UiState::new(&config).brand_choice.is_none());
    }

    #[test]
    fn test_ui_state_follows_session_lifecycle() {
        let config = InsightConfig::default();
        let (controller, bus) = controller();
        let mut state = UiState::new(&config);

        let handle = controller.open(Some(brand())).unwrap();
        state.process_events(bus.drain());
        assert_eq!(state.active, Some(handle));

        assert!(state.refresh(&controller, &config));
        assert_eq!(state.session_state(), Some(SessionState::Empty));
        assert_eq!(state.starters, config.starter_prompts);
        assert!(!state.refresh(&controller, &config), "unchanged revision must not re-project");

        block_on(controller.submit(handle, "What is the top campaign?")).unwrap();
        state.process_events(bus.drain());
        assert!(state.refresh(&controller, &config));
        assert_eq!(state.session_state(), Some(SessionState::AwaitingInput));
        assert!(state.starters.is_empty());
        assert!(state.can_archive());
        assert_eq!(state.model.as_ref().unwrap().rows.len(), 2);

        controller.close(handle).unwrap();
        state.process_events(bus.drain());
        assert!(state.active.is_none());
        assert!(state.model.is_none());
        assert!(!state.refresh(&controller, &config));
    }

    #[test]
    fn test_ui_state_ignores_events_of_other_sessions() {
        let config = InsightConfig::default();
        let mut state = UiState::new(&config);
        state.process_events(vec![SessionEvent::Opened { handle: SessionHandle(1), brand: brand() }]);
        state.process_events(vec![
            SessionEvent::TurnStarted { handle: SessionHandle(9), turn: 1 },
            SessionEvent::Closed { handle: SessionHandle(9) },
        ]);
        assert_eq!(state.active, Some(SessionHandle(1)));
        assert_eq!(state.status_text, "Asking about BRImo");
    }

    #[test]
    fn test_ui_state_status_text() {
        let config = InsightConfig::default();
        let mut state = UiState::new(&config);
        let handle = SessionHandle(3);
        state.process_events(vec![
            SessionEvent::Opened { handle, brand: brand() },
            SessionEvent::TurnStarted { handle, turn: 1 },
        ]);
        assert_eq!(state.status_text, "Analyzing...");

        state.process_events(vec![SessionEvent::TurnResolved {
            handle,
            turn: 1,
            status: TurnStatus::Failed,
        }]);
        assert_eq!(state.status_text, "Last question failed");
    }

    #[test]
    fn test_ui_state_archived_marks_history_stale() {
        let config = InsightConfig::default();
        let mut state = UiState::new(&config);
        state.set_history(Vec::new());
        assert!(!state.history_stale);

        state.process_events(vec![SessionEvent::Archived {
            id: "abc".to_string(),
            title: "Top campaign".to_string(),
        }]);
        assert!(state.history_stale);
        assert_eq!(state.status_text, "Saved to chat logs: Top campaign");
    }

    #[test]
    fn test_ui_state_show_archived() {
        let config = InsightConfig::default();
        let mut state = UiState::new(&config);
        let record = HistoricalSession::new(&answered(&["q"]), "q".to_string(), Utc::now());
        state.show_archived(&record);

        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.id, record.id);
        assert!(selected.model.read_only);
    }

    // ─── Settings / Theme Tests ──────────────────────────────

    #[test]
    fn test_endpoint_value() {
        assert_eq!(endpoint_value(""), None);
        assert_eq!(endpoint_value("   "), None);
        assert_eq!(
            endpoint_value(" https://api.example.com "),
            Some("https://api.example.com".to_string())
        );
    }

    #[test]
    fn test_storage_label() {
        assert_eq!(storage_label(&StorageBackendType::Auto), "Auto-detect");
        assert_eq!(storage_label(&StorageBackendType::IndexedDb), "IndexedDB");
    }

    #[test]
    fn test_change_color() {
        assert_eq!(change_color("+22% vs. avg"), SUCCESS);
        assert_eq!(change_color("-8%"), ERROR);
        assert_eq!(change_color("flat"), TEXT_SECONDARY);
    }
}
