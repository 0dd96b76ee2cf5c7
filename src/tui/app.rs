//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Background submission via the prediction worker

use std::io;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::HttpPredictionApi;
use crate::application::{InsightsService, PredictionController};
use crate::config::ClientConfig;
use crate::domain::{FieldKind, FormField};
use crate::ports::{ApiError, PredictionApi};

use super::ui::{
    data_insights::{render_data_insights, DataInsightsState},
    disclaimer::render_disclaimer_page,
    home::{render_home, HomeState, LastPrediction},
    model_info::{render_model_info, ModelInfoState},
    predict::{cycle_option, push_char, render_predict, PredictView},
    render_disclaimer,
    result::render_result,
};
use super::worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Predict,
    Result,
    ModelInfo,
    DataInsights,
    Disclaimer,
}

/// Main application state
pub struct App<A = HttpPredictionApi>
where
    A: PredictionApi + 'static,
{
    screen: Screen,
    should_quit: bool,

    controller: PredictionController<A>,
    insights: InsightsService<A>,

    home_state: HomeState,
    predict_view: PredictView,
    model_info_state: ModelInfoState,
    data_insights_state: DataInsightsState,
    disclaimer_scroll: u16,

    /// Worker for the submission in flight, if any
    pending_worker: Option<PredictionWorkerHandle>,
}

impl App<HttpPredictionApi> {
    /// Create the application against the HTTP backend described by `config`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = Arc::new(HttpPredictionApi::new(config)?);
        let api_url = api.config().base_url().to_string();
        Ok(Self::with_api(api, api_url))
    }
}

impl<A> App<A>
where
    A: PredictionApi + 'static,
{
    /// Create the application with an injected backend (composition root).
    pub fn with_api(api: Arc<A>, api_url: String) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            controller: PredictionController::new(api.clone()),
            insights: InsightsService::new(api),
            home_state: HomeState {
                api_url,
                ..HomeState::default()
            },
            predict_view: PredictView::default(),
            model_info_state: ModelInfoState::default(),
            data_insights_state: DataInsightsState::default(),
            disclaimer_scroll: 0,
            pending_worker: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn controller(&self) -> &PredictionController<A> {
        &self.controller
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        self.refresh_health();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();

            terminal.draw(|f| self.draw(f))?;

            // Short poll keeps worker updates responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the current screen plus the disclaimer footer.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(f.area());

        let content_area = chunks[0];

        match self.screen {
            Screen::Home => render_home(f, content_area, &self.home_state),
            Screen::Predict => render_predict(
                f,
                content_area,
                self.controller.form(),
                &self.predict_view,
                self.controller.state(),
            ),
            Screen::Result => match self.controller.state().result() {
                Some(result) => {
                    render_result(f, content_area, result, self.controller.completed_at());
                }
                None => render_predict(
                    f,
                    content_area,
                    self.controller.form(),
                    &self.predict_view,
                    self.controller.state(),
                ),
            },
            Screen::ModelInfo => render_model_info(f, content_area, &self.model_info_state),
            Screen::DataInsights => {
                render_data_insights(f, content_area, &self.data_insights_state);
            }
            Screen::Disclaimer => render_disclaimer_page(f, content_area, self.disclaimer_scroll),
        }

        render_disclaimer(f, chunks[1]);
    }

    /// Drain worker updates and apply a finished submission.
    pub fn poll_worker(&mut self) {
        loop {
            // Take each message before mutating self; the handle stays borrowed otherwise.
            let Some(received) = self.pending_worker.as_ref().map(PredictionWorkerHandle::try_recv)
            else {
                return;
            };
            match received {
                Ok(PredictionProgress::Sending) => {
                    tracing::debug!("Prediction request sent");
                }
                Ok(PredictionProgress::Complete { generation, outcome }) => {
                    self.pending_worker = None;
                    if self.controller.complete(generation, outcome) {
                        self.on_submission_finished();
                    }
                    return;
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    let Some(worker) = self.pending_worker.take() else {
                        return;
                    };
                    tracing::warn!(generation = worker.generation, "Prediction worker exited without an outcome");
                    let outcome = Err(ApiError::Transport(
                        "prediction worker stopped unexpectedly".to_string(),
                    ));
                    if self.controller.complete(worker.generation, outcome) {
                        self.on_submission_finished();
                    }
                    return;
                }
            }
        }
    }

    fn on_submission_finished(&mut self) {
        let Some(result) = self.controller.state().result() else {
            return;
        };
        self.home_state.last_prediction = Some(LastPrediction {
            risk_level: result.risk_level.clone(),
            received_at: self.controller.completed_at().unwrap_or_else(Utc::now),
        });
        if self.screen == Screen::Predict {
            self.screen = Screen::Result;
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Predict => self.handle_predict_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::ModelInfo => self.handle_model_info_key(key),
            Screen::DataInsights => self.handle_data_insights_key(key),
            Screen::Disclaimer => self.handle_disclaimer_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.screen = Screen::Predict;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.load_model_info();
                self.screen = Screen::ModelInfo;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.load_data_stats();
                self.screen = Screen::DataInsights;
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.disclaimer_scroll = 0;
                self.screen = Screen::Disclaimer;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.refresh_health();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_predict_key(&mut self, key: KeyCode) {
        let field = self.predict_view.selected_field();
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.predict_view.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.predict_view.next_field();
            }
            KeyCode::Left | KeyCode::Right => {
                if let FieldKind::Select(options) = field.kind() {
                    let next = cycle_option(
                        self.controller.form().get(field),
                        options,
                        key == KeyCode::Right,
                    );
                    self.edit(field, next);
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.controller.load_sample();
                self.predict_view.notice = None;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.controller.reset_form();
                self.predict_view = PredictView::default();
            }
            KeyCode::Char(c) => {
                if matches!(field.kind(), FieldKind::Number { .. }) {
                    if let Some(next) = push_char(self.controller.form().get(field), c) {
                        self.edit(field, next);
                    }
                }
            }
            KeyCode::Backspace => {
                if matches!(field.kind(), FieldKind::Number { .. }) {
                    let mut next = self.controller.form().get(field).to_string();
                    next.pop();
                    self.edit(field, next);
                }
            }
            KeyCode::Delete => {
                if matches!(field.kind(), FieldKind::Number { .. }) {
                    self.edit(field, String::new());
                }
            }
            KeyCode::Enter => {
                self.submit_prediction();
            }
            _ => {}
        }
    }

    fn edit(&mut self, field: FormField, value: String) {
        self.controller.update_field(field, value);
        self.predict_view.notice = None;
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            // Closing keeps the form values for a follow-up prediction
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.screen = Screen::Predict;
            }
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            _ => {}
        }
    }

    fn handle_model_info_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.load_model_info();
            }
            _ => {}
        }
    }

    fn handle_data_insights_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.load_data_stats();
            }
            _ => {}
        }
    }

    fn handle_disclaimer_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            KeyCode::Up => {
                self.disclaimer_scroll = self.disclaimer_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.disclaimer_scroll = self.disclaimer_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn submit_prediction(&mut self) {
        if self.controller.is_pending() {
            return;
        }

        // Advisory checks block the keypress only, like native form validation.
        if let Some(issue) = self.controller.form().advisory_issues().into_iter().next() {
            self.predict_view.focus(issue.field());
            self.predict_view.notice = Some(issue.to_string());
            return;
        }
        self.predict_view.notice = None;

        if let Some(submission) = self.controller.begin_submit() {
            let api = self.controller.api().clone();
            self.pending_worker = Some(PredictionWorker::spawn(api, submission));
        }
    }

    fn refresh_health(&mut self) {
        let health = self.insights.health().map_err(|e| {
            tracing::warn!(error = %e, "Health check failed");
            catalog_error_message(&e)
        });
        self.home_state.health = Some(health);
    }

    fn load_model_info(&mut self) {
        match self.insights.model_overview() {
            Ok(overview) => {
                self.model_info_state.overview = Some(overview);
                self.model_info_state.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load model information");
                self.model_info_state.error = Some(catalog_error_message(&e));
            }
        }
    }

    fn load_data_stats(&mut self) {
        match self.insights.data_stats() {
            Ok(stats) => {
                self.data_insights_state.stats = Some(stats);
                self.data_insights_state.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load dataset statistics");
                self.data_insights_state.error = Some(catalog_error_message(&e));
            }
        }
    }
}

/// Error text for the informational screens: server detail if any,
/// otherwise the error itself.
fn catalog_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Server {
            detail: Some(detail),
            ..
        } => detail.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DataStats, HealthStatus, ModelInfo, ModelMetrics,
        PredictionRequest, PredictionResult, RequestState, FALLBACK_ERROR_MESSAGE,
    };
    use ratatui::backend::TestBackend;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    struct FakeApi {
        predictions: Mutex<Vec<PredictionRequest>>,
        crash_on_predict: AtomicBool,
    }

    impl FakeApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                predictions: Mutex::new(Vec::new()),
                crash_on_predict: AtomicBool::new(false),
            })
        }
    }

    impl PredictionApi for FakeApi {
        fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
            assert!(!self.crash_on_predict.load(Ordering::SeqCst), "backend client crashed");
            self.predictions.lock().expect("lock").push(request.clone());
            Ok(PredictionResult {
                risk_level: "Moderate Risk".into(),
                probability: 45.17,
                message: "Moderate probability of cardiovascular disease.".into(),
                prediction: Some(0),
            })
        }

        fn model_info(&self) -> Result<ModelInfo, ApiError> {
            Ok(ModelInfo {
                model_type: "Random Forest Classifier".into(),
                training_samples: 54837,
                test_samples: 13710,
                features: vec!["gender".into()],
                parameters: BTreeMap::from([("n_estimators".to_string(), 200.into())]),
            })
        }

        fn metrics(&self) -> Result<ModelMetrics, ApiError> {
            Ok(ModelMetrics {
                test_accuracy: 73.21,
                train_accuracy: 74.95,
                precision: 0.75,
                recall: 0.68,
                f1_score: 0.71,
                confusion_matrix: [[5423, 1536], [2143, 4608]],
            })
        }

        fn data_stats(&self) -> Result<DataStats, ApiError> {
            Err(ApiError::Server {
                status: 500,
                detail: Some("Statistics unavailable".into()),
            })
        }

        fn health(&self) -> Result<HealthStatus, ApiError> {
            Ok(HealthStatus {
                status: "healthy".into(),
                model_loaded: true,
                scaler_loaded: true,
            })
        }
    }

    fn app() -> (App<FakeApi>, Arc<FakeApi>) {
        let api = FakeApi::new();
        (App::with_api(api.clone(), "http://localhost:8000".into()), api)
    }

    fn press(app: &mut App<FakeApi>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn wait_for_worker(app: &mut App<FakeApi>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.controller().is_pending() {
            assert!(Instant::now() < deadline, "worker timed out");
            app.poll_worker();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_sample_submit_shows_result() {
        let (mut app, api) = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.screen(), Screen::Predict);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert!(app.controller().is_pending());

        // Ignored while the first submission is in flight
        press(&mut app, KeyCode::Enter);

        wait_for_worker(&mut app);
        assert_eq!(app.screen(), Screen::Result);
        assert_eq!(api.predictions.lock().expect("lock").len(), 1);
        assert!(matches!(app.controller().state(), RequestState::Success(_)));
        assert!(app.home_state.last_prediction.is_some());

        // Closing keeps the entered values
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Predict);
        assert_eq!(app.controller().form().get(FormField::Height), "168");
    }

    #[test]
    fn test_advisory_issue_blocks_submit() {
        let (mut app, api) = app();
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().state(), &RequestState::Idle);
        assert!(api.predictions.lock().expect("lock").is_empty());
        assert_eq!(app.predict_view.selected_field(), FormField::AgeYears);
        assert!(app.predict_view.notice.is_some());
    }

    #[test]
    fn test_off_step_height_blocks_submit() {
        let (mut app, api) = app();
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('s'));
        app.predict_view.focus(FormField::Height);
        press(&mut app, KeyCode::Char('.'));
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.controller().form().get(FormField::Height), "168.7");

        app.predict_view.focus(FormField::Gender);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().state(), &RequestState::Idle);
        assert!(api.predictions.lock().expect("lock").is_empty());
        assert_eq!(app.predict_view.selected_field(), FormField::Height);
        assert!(app.predict_view.notice.is_some());
    }

    #[test]
    fn test_crashed_worker_fails_submission() {
        let (mut app, api) = app();
        api.crash_on_predict.store(true, Ordering::SeqCst);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert!(app.controller().is_pending());

        wait_for_worker(&mut app);

        assert_eq!(
            app.controller().state(),
            &RequestState::Failed(FALLBACK_ERROR_MESSAGE.to_string())
        );
        assert_eq!(app.screen(), Screen::Predict);
        assert!(app.pending_worker.is_none());

        // Enter works again once the failure is recorded.
        api.crash_on_predict.store(false, Ordering::SeqCst);
        press(&mut app, KeyCode::Enter);
        wait_for_worker(&mut app);
        assert_eq!(app.screen(), Screen::Result);
    }

    #[test]
    fn test_typing_height_and_weight_derives_bmi() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('p'));
        app.predict_view.focus(FormField::Height);
        for c in "168".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Down);
        for c in "70".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.controller().form().get(FormField::Bmi), "24.80");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller().form().get(FormField::Weight), "7");
        assert_eq!(app.controller().form().get(FormField::Bmi), "2.48");
    }

    #[test]
    fn test_select_fields_cycle() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.controller().form().get(FormField::Gender), "2");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.controller().form().get(FormField::Gender), "1");
        // Letters are ignored on select fields
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.controller().form().get(FormField::Gender), "1");
    }

    #[test]
    fn test_catalog_screens_load_and_fail() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.screen(), Screen::ModelInfo);
        assert!(app.model_info_state.overview.is_some());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.screen(), Screen::DataInsights);
        assert_eq!(
            app.data_insights_state.error.as_deref(),
            Some("Statistics unavailable")
        );
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_every_screen_renders() {
        let (mut app, _) = app();
        app.refresh_health();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");

        for key in ['p', 's'] {
            press(&mut app, KeyCode::Char(key));
        }
        terminal.draw(|f| app.draw(f)).expect("predict");

        press(&mut app, KeyCode::Enter);
        wait_for_worker(&mut app);
        terminal.draw(|f| app.draw(f)).expect("result");

        for (key, screen) in [('m', Screen::ModelInfo), ('d', Screen::DataInsights), ('i', Screen::Disclaimer)] {
            app.screen = Screen::Home;
            terminal.draw(|f| app.draw(f)).expect("home");
            press(&mut app, KeyCode::Char(key));
            assert_eq!(app.screen(), screen);
            terminal.draw(|f| app.draw(f)).expect("screen");
        }
    }

    #[test]
    fn test_catalog_error_message_prefers_detail() {
        let with_detail = ApiError::Server {
            status: 500,
            detail: Some("Statistics unavailable".into()),
        };
        assert_eq!(catalog_error_message(&with_detail), "Statistics unavailable");

        let without_detail = ApiError::Server {
            status: 503,
            detail: None,
        };
        assert_eq!(catalog_error_message(&without_detail), "Backend returned HTTP 503");
    }
}
