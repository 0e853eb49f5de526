use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, TryRecvError};
use triage_core::{
    CancellationToken, CatalogMessage, Controller, DeleteMessage, DeletionExecutor, DeletionPlan,
    DeletionReport, Effect, Event, ExitReason, FsCatalog, HighlightedLine, Highlighter, Screen,
    SyntaxHighlighter, TriageError, is_code_file, spawn_load,
};

use super::Action;

/// A deletion run on its worker thread
struct DeletionJob {
    receiver: Receiver<DeleteMessage>,
    handle: Option<JoinHandle<DeletionReport>>,
    cancel_token: CancellationToken,
}

/// Highlighted preview for the item under the cursor
struct CodePreview {
    cursor: usize,
    lines: Vec<HighlightedLine>,
}

/// Application state
pub struct AppState {
    /// Directory under review
    pub root_path: PathBuf,
    controller: Controller,
    catalog_rx: Option<Receiver<CatalogMessage>>,
    deletion: Option<DeletionJob>,
    highlighter: Box<dyn Highlighter>,
    code_preview: Option<CodePreview>,
}

impl AppState {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            controller: Controller::new(),
            catalog_rx: None,
            deletion: None,
            highlighter: Box::new(SyntaxHighlighter::new()),
            code_preview: None,
        }
    }

    /// Kick off the catalog load on a worker thread
    pub fn start_loading(&mut self) {
        let provider = FsCatalog::default();
        self.catalog_rx = Some(spawn_load(provider, self.root_path.clone()));
    }

    #[cfg(test)]
    fn with_catalog_receiver(mut self, rx: Receiver<CatalogMessage>) -> Self {
        self.catalog_rx = Some(rx);
        self
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn should_quit(&self) -> bool {
        !self.controller.is_running()
    }

    pub fn exit_reason(&self) -> Option<&ExitReason> {
        self.controller.exit_reason()
    }

    /// Highlighted lines for the current item, when it is a code file
    pub fn code_preview(&self) -> Option<&[HighlightedLine]> {
        self.code_preview.as_ref().map(|p| p.lines.as_slice())
    }

    /// Drain worker channels into the controller
    pub fn poll_background(&mut self) {
        if let Some(rx) = &self.catalog_rx {
            match rx.try_recv() {
                Ok(msg) => {
                    self.catalog_rx = None;
                    self.dispatch(Event::from(msg));
                }
                Err(TryRecvError::Disconnected) => {
                    self.catalog_rx = None;
                    tracing::error!("catalog worker exited without a result");
                    self.dispatch(Event::CatalogFailed(TriageError::Walk(
                        "catalog worker exited without a result".to_string(),
                    )));
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        while let Some(job) = &self.deletion {
            match job.receiver.try_recv() {
                Ok(msg) => {
                    let finished = matches!(msg, DeleteMessage::Finished(_));
                    if finished {
                        self.join_deletion();
                    }
                    self.dispatch(Event::from(msg));
                    if finished {
                        break;
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    self.join_deletion();
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }
    }

    /// Feed a user action to the controller
    pub fn handle_action(&mut self, action: Action) {
        if let Some(event) = action.to_event() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: Event) {
        if let Some(effect) = self.controller.handle(event) {
            self.apply(effect);
        }
        self.refresh_code_preview();
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::StartDeletion(plan) => self.start_deletion(plan),
            Effect::Exit(reason) => {
                tracing::info!(?reason, "exiting");
                if let Some(job) = &self.deletion {
                    job.cancel_token.cancel();
                }
                self.join_deletion();
            }
        }
    }

    fn start_deletion(&mut self, plan: DeletionPlan) {
        tracing::info!(
            entries = plan.len(),
            bytes = plan.total_bytes(),
            "starting deletion"
        );
        let cancel_token = CancellationToken::new();
        let executor = DeletionExecutor::new().with_cancellation(cancel_token.clone());
        let (receiver, handle) = executor.spawn(plan);
        self.deletion = Some(DeletionJob {
            receiver,
            handle: Some(handle),
            cancel_token,
        });
    }

    /// Wait for the worker so an in-flight removal completes
    fn join_deletion(&mut self) {
        if let Some(mut job) = self.deletion.take()
            && let Some(handle) = job.handle.take()
            && handle.join().is_err()
        {
            tracing::error!("deletion worker panicked");
        }
    }

    fn refresh_code_preview(&mut self) {
        if self.controller.screen() != Screen::Review {
            self.code_preview = None;
            return;
        }

        let session = self.controller.session();
        let cursor = session.cursor();
        if self.code_preview.as_ref().is_some_and(|p| p.cursor == cursor) {
            return;
        }

        self.code_preview = session.current().and_then(|item| {
            let text = item.preview.as_deref()?;
            if !is_code_file(&item.path) {
                return None;
            }
            Some(CodePreview {
                cursor,
                lines: self.highlighter.highlight(text, &item.path),
            })
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;
    use triage_core::TokenKind;

    fn pump_until(state: &mut AppState, screen: Screen) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.screen() != screen && !state.should_quit() {
            assert!(Instant::now() < deadline, "timed out waiting for {screen:?}");
            state.poll_background();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_delete_flow_removes_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "bye").unwrap();
        fs::write(temp.path().join("b.txt"), "stay").unwrap();

        let mut state = AppState::new(temp.path().to_path_buf());
        state.start_loading();
        pump_until(&mut state, Screen::Review);

        state.handle_action(Action::Delete);
        state.handle_action(Action::Keep);
        assert_eq!(state.screen(), Screen::Confirm);

        state.handle_action(Action::ConfirmYes);
        pump_until(&mut state, Screen::Complete);

        let report = state.controller().report().unwrap();
        assert_eq!(report.succeeded, 1);
        assert!(!temp.path().join("a.txt").exists());
        assert!(temp.path().join("b.txt").exists());

        state.handle_action(Action::Quit);
        assert_eq!(state.exit_reason(), Some(&ExitReason::Finished));
    }

    #[test]
    fn test_code_file_gets_highlighted_preview() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.rs"), "fn main() {}\n").unwrap();

        let mut state = AppState::new(temp.path().to_path_buf());
        state.start_loading();
        pump_until(&mut state, Screen::Review);

        let lines = state.code_preview().unwrap();
        assert_eq!(lines.len(), 1);
        let text: String = lines[0].iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "fn main() {}");
        assert_eq!(lines[0][0].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_force_quit_while_loading() {
        let temp = TempDir::new().unwrap();
        let mut state = AppState::new(temp.path().to_path_buf());
        state.handle_action(Action::ForceQuit);
        assert!(state.should_quit());
        assert_eq!(state.exit_reason(), Some(&ExitReason::Interrupted));
    }

    #[test]
    fn test_lost_catalog_worker_is_fatal() {
        let temp = TempDir::new().unwrap();
        let (tx, rx) = crossbeam_channel::bounded::<CatalogMessage>(1);
        drop(tx);

        let mut state = AppState::new(temp.path().to_path_buf()).with_catalog_receiver(rx);
        state.poll_background();

        assert!(state.should_quit());
        let reason = state.exit_reason().unwrap();
        assert!(matches!(reason, ExitReason::Fatal(_)));
        assert_eq!(reason.exit_code(), 1);
    }

    #[test]
    fn test_force_quit_during_deletion_joins_worker() {
        let temp = TempDir::new().unwrap();
        let names: Vec<String> = (0..20).map(|i| format!("file{i:02}.txt")).collect();
        for name in &names {
            fs::write(temp.path().join(name), "payload").unwrap();
        }

        let mut state = AppState::new(temp.path().to_path_buf());
        state.start_loading();
        pump_until(&mut state, Screen::Review);

        for _ in &names {
            state.handle_action(Action::Delete);
        }
        assert_eq!(state.screen(), Screen::Confirm);

        state.handle_action(Action::ConfirmYes);
        assert_eq!(state.screen(), Screen::Progress);
        state.handle_action(Action::ForceQuit);

        assert_eq!(state.exit_reason(), Some(&ExitReason::Interrupted));
        assert!(state.deletion.is_none());

        // Each file is either gone or untouched, never half-removed
        for name in &names {
            let path = temp.path().join(name);
            if path.exists() {
                assert_eq!(fs::read_to_string(&path).unwrap(), "payload");
            }
        }
    }

    #[test]
    fn test_unbound_keys_leave_spinner_alone() {
        let temp = TempDir::new().unwrap();
        let mut state = AppState::new(temp.path().to_path_buf());

        for _ in 0..3 {
            state.handle_action(Action::None);
        }
        assert_eq!(state.controller().spinner_frame(), 0);

        state.handle_action(Action::Tick);
        assert_eq!(state.controller().spinner_frame(), 1);
    }
}
