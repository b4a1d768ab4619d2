use crate::input::normalize_dropped_path;
use crate::keybinds::Keybinds;
use crate::picker::{EntryKind, FilePicker};
use crate::ui::layout::LayoutState;
use crate::ui::panel::PanelType;
use crate::Config;
use anyhow::Result;
use birdwatch_classifier::{ApiError, ApiResult, ClassifierApi, PredictionLabel, SelectedFile};
use chrono::{DateTime, Local};
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::future::Future;
use std::path::Path;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::{
    AppAsyncEvent, Notice, NoticeKind, ResultBanner, ServiceStatus, SubmitControl, WorkflowState,
};

impl App {
    pub(super) fn report_error(&self, context: &str, error: impl std::fmt::Display) {
        tracing::warn!("{context}: {error}");
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::KeyEventState;
    use ratatui::Terminal;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[derive(Clone)]
    struct MockClassifier {
        responses: Arc<Mutex<VecDeque<(StatusCode, &'static str)>>>,
        hits: Arc<AtomicUsize>,
        uploads: Arc<Mutex<Vec<(String, String)>>>,
    }

    async fn predict_handler(
        State(state): State<MockClassifier>,
        mut multipart: Multipart,
    ) -> (StatusCode, &'static str) {
        state.hits.fetch_add(1, Ordering::SeqCst);
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();
            let _ = field.bytes().await;
            state
                .uploads
                .lock()
                .expect("uploads lock")
                .push((name, file_name));
        }
        let mut responses = state.responses.lock().expect("responses lock");
        if responses.len() > 1 {
            responses.pop_front().expect("queued response")
        } else {
            *responses.front().expect("at least one response")
        }
    }

    async fn spawn_classifier(responses: Vec<(StatusCode, &'static str)>) -> (String, MockClassifier) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let state = MockClassifier {
            responses: Arc::new(Mutex::new(responses.into())),
            hits: Arc::new(AtomicUsize::new(0)),
            uploads: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/predict/", post(predict_handler))
            .with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}/predict/"), state)
    }

    fn app_for(endpoint: &str) -> App {
        let mut config = Config::default();
        config.classifier.endpoint = endpoint.to_string();
        App::new(config).expect("app")
    }

    fn offline_app() -> App {
        app_for("http://127.0.0.1:9/predict/")
    }

    fn csv(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, b"V\n0.5\n0.7\n".to_vec())
    }

    async fn wait_for_event(app: &mut App) -> usize {
        for _ in 0..500 {
            let received = app.process_async_events();
            if received > 0 {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no async event arrived");
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).expect("terminal");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        terminal
    }

    #[test]
    fn starts_idle_without_file() {
        let app = offline_app();
        assert_eq!(app.workflow, WorkflowState::Idle);
        assert!(app.selected_file.is_none());
        assert!(app.result_banner().is_none());
        assert!(app.submit_control().enabled);
    }

    #[test]
    fn submit_without_file_raises_notice_and_sends_nothing() {
        let mut app = offline_app();

        assert!(!app.submit());

        assert_eq!(app.workflow, WorkflowState::Idle);
        let notice = app.notice.as_ref().expect("notice");
        assert_eq!(notice.kind, NoticeKind::NoFileSelected);
        assert_eq!(notice.message, "Please select a CSV file first!");
        assert!(app.app_async_rx.as_mut().expect("rx").try_recv().is_err());
    }

    #[test]
    fn selecting_a_file_clears_previous_result() {
        let mut app = offline_app();
        app.select_file(csv("first.csv"));
        app.workflow = WorkflowState::Resolved(PredictionLabel::new("Bird"));

        app.select_file(csv("second.csv"));

        assert_eq!(app.workflow, WorkflowState::FileChosen);
        assert!(app.result_banner().is_none());
        assert_eq!(app.selected_file.as_ref().map(|f| f.name.as_str()), Some("second.csv"));
    }

    #[test]
    fn mismatched_extension_is_still_accepted() {
        let mut app = offline_app();
        app.select_file(SelectedFile::from_bytes("capture.txt", b"1,2,3".to_vec()));
        assert_eq!(app.workflow, WorkflowState::FileChosen);
    }

    #[tokio::test]
    async fn bird_response_resolves_with_positive_banner() {
        let (endpoint, server) = spawn_classifier(vec![(StatusCode::OK, r#"{"prediction":"Bird"}"#)]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));

        assert!(app.submit());
        assert!(app.workflow.is_submitting());
        assert!(!app.submit_control().enabled);
        assert_eq!(app.submit_control().label, "Processing...");

        wait_for_event(&mut app).await;

        assert_eq!(app.workflow, WorkflowState::Resolved(PredictionLabel::new("Bird")));
        let banner = app.result_banner().expect("banner");
        assert!(banner.positive);
        assert!(app.resolved_at.is_some());
        assert_eq!(server.hits.load(Ordering::SeqCst), 1);

        let terminal = draw(&mut app);
        let screen = screen_text(&terminal);
        assert!(screen.contains("Prediction:"));
        assert!(screen.contains("Bird"));
    }

    #[tokio::test]
    async fn drone_response_resolves_with_negative_banner() {
        let (endpoint, _server) =
            spawn_classifier(vec![(StatusCode::OK, r#"{"prediction":"Drone"}"#)]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));
        app.submit();

        wait_for_event(&mut app).await;

        let banner = app.result_banner().expect("banner");
        assert!(!banner.positive);
        assert_eq!(banner.label.as_str(), "Drone");
        assert!(screen_text(&draw(&mut app)).contains("Drone"));
    }

    #[tokio::test]
    async fn unknown_label_takes_negative_styling() {
        let (endpoint, _server) =
            spawn_classifier(vec![(StatusCode::OK, r#"{"prediction":"Balloon"}"#)]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));
        app.submit();

        wait_for_event(&mut app).await;

        let banner = app.result_banner().expect("banner");
        assert!(!banner.positive);
        assert_eq!(banner.label.as_str(), "Balloon");
    }

    #[tokio::test]
    async fn http_failure_clears_in_flight_and_shows_notice() {
        let (endpoint, _server) = spawn_classifier(vec![(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail":"model crashed"}"#,
        )])
        .await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));
        app.submit();

        wait_for_event(&mut app).await;

        assert_eq!(app.workflow, WorkflowState::Failed);
        assert!(app.submit_control().enabled);
        assert!(app.result_banner().is_none());
        let notice = app.notice.clone().expect("notice");
        assert_eq!(notice.kind, NoticeKind::UploadFailed);
        assert_eq!(notice.message, "Error uploading file");
        assert!(!screen_text(&draw(&mut app)).contains("Prediction:"));
    }

    #[tokio::test]
    async fn selecting_a_file_after_failure_clears_the_error() {
        let (endpoint, _server) =
            spawn_classifier(vec![(StatusCode::BAD_GATEWAY, "upstream down")]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("a.csv"));
        app.submit();
        wait_for_event(&mut app).await;
        assert_eq!(app.workflow, WorkflowState::Failed);
        assert!(app.notice.is_some());

        app.select_file(csv("b.csv"));

        assert_eq!(app.workflow, WorkflowState::FileChosen);
        assert!(app.notice.is_none());
        let screen = screen_text(&draw(&mut app));
        assert!(!screen.contains("Error uploading file"));
        assert!(screen.contains("b.csv"));
    }

    #[test]
    fn input_errors_use_generic_notice_kind() {
        let mut app = offline_app();

        app.show_error_notice(&anyhow::anyhow!("working directory is gone"));

        let notice = app.notice.as_ref().expect("notice");
        assert_eq!(notice.kind, NoticeKind::ActionFailed);
        assert!(notice.message.contains("working directory is gone"));
    }

    #[tokio::test]
    async fn malformed_body_fails_like_http_failure() {
        let (endpoint, _server) = spawn_classifier(vec![(StatusCode::OK, "not json")]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));
        app.submit();

        wait_for_event(&mut app).await;

        assert_eq!(app.workflow, WorkflowState::Failed);
        assert_eq!(
            app.notice.as_ref().map(|n| n.message.as_str()),
            Some("Error uploading file")
        );
    }

    #[tokio::test]
    async fn unreachable_service_fails_with_generic_notice() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let mut app = app_for(&format!("http://{addr}/predict/"));
        app.select_file(csv("flight.csv"));
        app.submit();

        wait_for_event(&mut app).await;

        assert_eq!(app.workflow, WorkflowState::Failed);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::UploadFailed));
    }

    #[tokio::test]
    async fn resubmit_issues_one_new_request_and_can_change_outcome() {
        let (endpoint, server) = spawn_classifier(vec![
            (StatusCode::OK, r#"{"prediction":"Bird"}"#),
            (StatusCode::BAD_GATEWAY, "{}"),
        ])
        .await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));

        app.submit();
        wait_for_event(&mut app).await;
        assert_eq!(app.workflow, WorkflowState::Resolved(PredictionLabel::new("Bird")));

        assert!(app.submit());
        wait_for_event(&mut app).await;

        assert_eq!(app.workflow, WorkflowState::Failed);
        assert_eq!(server.hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_ignored() {
        let (endpoint, server) =
            spawn_classifier(vec![(StatusCode::OK, r#"{"prediction":"Bird"}"#)]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("flight.csv"));

        assert!(app.submit());
        assert!(!app.submit());
        wait_for_event(&mut app).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.process_async_events();

        assert_eq!(server.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn late_result_for_superseded_selection_is_discarded() {
        let (endpoint, server) =
            spawn_classifier(vec![(StatusCode::OK, r#"{"prediction":"Drone"}"#)]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("old.csv"));
        app.submit();

        app.select_file(csv("new.csv"));
        wait_for_event(&mut app).await;

        assert_eq!(app.workflow, WorkflowState::FileChosen);
        assert!(app.result_banner().is_none());
        assert!(app.notice.is_none());
        assert_eq!(server.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn most_recent_selection_is_uploaded() {
        let (endpoint, server) =
            spawn_classifier(vec![(StatusCode::OK, r#"{"prediction":"Bird"}"#)]).await;
        let mut app = app_for(&endpoint);
        app.select_file(csv("a.csv"));
        app.select_file(csv("b.csv"));
        app.select_file(csv("c.csv"));

        app.submit();
        wait_for_event(&mut app).await;

        let uploads = server.uploads.lock().expect("uploads lock").clone();
        assert_eq!(uploads, vec![("input_file".to_string(), "c.csv".to_string())]);
    }

    #[test]
    fn dropped_path_selects_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dropped capture.csv");
        std::fs::write(&path, "V\n1\n").expect("write");
        let mut app = offline_app();

        app.handle_event(Event::Paste(format!("'{}'", path.display())))
            .expect("paste");

        assert_eq!(app.workflow, WorkflowState::FileChosen);
        assert_eq!(
            app.selected_file.as_ref().map(|f| f.name.as_str()),
            Some("dropped capture.csv")
        );
    }

    #[test]
    fn unreadable_drop_keeps_state_and_raises_notice() {
        let mut app = offline_app();
        app.select_file(csv("kept.csv"));

        app.drop_text("/definitely/not/here.csv");

        assert_eq!(app.workflow, WorkflowState::FileChosen);
        assert_eq!(app.selected_file.as_ref().map(|f| f.name.as_str()), Some("kept.csv"));
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::FileUnreadable));
    }

    #[test]
    fn notice_blocks_input_until_dismissed() {
        let mut app = offline_app();
        app.handle_event(key(KeyCode::Enter)).expect("enter");
        assert!(app.notice.is_some());

        app.handle_event(key(KeyCode::Char('?'))).expect("help key");
        assert!(!app.show_help);

        app.handle_event(key(KeyCode::Esc)).expect("dismiss");
        assert!(app.notice.is_none());

        app.handle_event(key(KeyCode::Char('?'))).expect("help key");
        assert!(app.show_help);
    }

    #[test]
    fn picker_selects_file_with_keyboard() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("radar.csv"), "V\n1\n").expect("write");
        let mut app = offline_app();
        app.picker = Some(FilePicker::open(dir.path().to_path_buf(), "csv").expect("picker"));

        for c in "radar".chars() {
            app.handle_event(key(KeyCode::Char(c))).expect("type");
        }
        app.handle_event(key(KeyCode::Enter)).expect("choose");

        assert!(app.picker.is_none());
        assert_eq!(app.selected_file.as_ref().map(|f| f.name.as_str()), Some("radar.csv"));
        assert_eq!(app.workflow, WorkflowState::FileChosen);
    }

    #[test]
    fn clicking_submit_without_file_raises_notice() {
        let mut app = offline_app();
        draw(&mut app);
        let button = app
            .layout
            .get_rect(PanelType::SubmitButton)
            .expect("button rect");

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: button.x + 1,
            row: button.y + 1,
            modifiers: KeyModifiers::NONE,
        }))
        .expect("click");

        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::NoFileSelected));
    }

    #[test]
    fn drop_zone_shows_selected_file_name() {
        let mut app = offline_app();
        assert!(screen_text(&draw(&mut app)).contains("Choose CSV File or Drag & Drop"));

        app.select_file(csv("sortie_12.csv"));
        assert!(screen_text(&draw(&mut app)).contains("sortie_12.csv"));
    }
}
