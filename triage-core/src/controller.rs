//! Screen controller: the five-screen state machine driving a review run.
//!
//! ```text
//! Loading --ready(non-empty)--> Review --sweep done--> Confirm --yes--> Progress --finished--> Complete
//!    |  \--ready(empty)------------------------------------------------------------------------^
//!    \--error--> exit(fatal)     Review/Confirm --quit/no--> exit      Complete --quit--> exit
//! ```
//!
//! Every event is applied completely before the next one. The controller
//! never performs IO itself; it hands back an [`Effect`] for the caller to
//! carry out. Force-quit is honored on every screen.

use std::path::PathBuf;

use log::debug;

use crate::catalog::CatalogMessage;
use crate::error::TriageError;
use crate::executor::{DeleteMessage, DeletionPlan, DeletionReport};
use crate::item::{Item, Outcome};
use crate::session::{PendingSets, ReviewSession};

/// Number of spinner frames the renderer cycles through
pub const SPINNER_FRAMES: usize = 10;

/// Active UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Catalog is being listed
    Loading,
    /// One item at a time
    Review,
    /// Sweep done, waiting for the go-ahead
    Confirm,
    /// Deletion running
    Progress,
    /// Summary
    Complete,
}

/// User intents, already mapped from raw keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Keep,
    Delete,
    Skip,
    Undo,
    Quit,
    ConfirmYes,
    ConfirmNo,
}

/// Everything the controller reacts to
#[derive(Debug)]
pub enum Event {
    CatalogReady(Vec<Item>),
    CatalogFailed(TriageError),
    Input(Input),
    ItemRemoved {
        path: PathBuf,
        size: u64,
        error: Option<String>,
    },
    DeletionFinished(DeletionReport),
    /// Animation timer
    Tick,
    /// Ctrl+C and friends; honored everywhere
    ForceQuit,
}

impl From<CatalogMessage> for Event {
    fn from(msg: CatalogMessage) -> Self {
        match msg {
            CatalogMessage::Ready(items) => Event::CatalogReady(items),
            CatalogMessage::Failed(e) => Event::CatalogFailed(e),
        }
    }
}

impl From<DeleteMessage> for Event {
    fn from(msg: DeleteMessage) -> Self {
        match msg {
            DeleteMessage::Removed { path, size, error } => Event::ItemRemoved { path, size, error },
            DeleteMessage::Finished(report) => Event::DeletionFinished(report),
        }
    }
}

/// Why the run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// Quit from the Complete screen
    Finished,
    /// Quit before any deletion started
    Cancelled,
    /// Force-quit
    Interrupted,
    /// Catalog could not be listed
    Fatal(String),
}

impl ExitReason {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitReason::Fatal(_) => 1,
            _ => 0,
        }
    }
}

/// Side effects the caller must perform
#[derive(Debug, Clone)]
pub enum Effect {
    StartDeletion(DeletionPlan),
    Exit(ExitReason),
}

/// Counters for the Progress screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionProgress {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub bytes_freed: u64,
}

impl DeletionProgress {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Process-wide UI state
#[derive(Debug)]
pub struct Controller {
    screen: Screen,
    session: ReviewSession,
    pending: Option<PendingSets>,
    progress: DeletionProgress,
    report: Option<DeletionReport>,
    error: Option<String>,
    spinner_frame: usize,
    exit: Option<ExitReason>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            screen: Screen::Loading,
            session: ReviewSession::default(),
            pending: None,
            progress: DeletionProgress::default(),
            report: None,
            error: None,
            spinner_frame: 0,
            exit: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    /// Pending sets, available from Confirm onwards
    pub fn pending(&self) -> Option<&PendingSets> {
        self.pending.as_ref()
    }

    pub fn progress(&self) -> &DeletionProgress {
        &self.progress
    }

    /// Final report, available on Complete
    pub fn report(&self) -> Option<&DeletionReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    /// Set once the run has terminated
    pub fn exit_reason(&self) -> Option<&ExitReason> {
        self.exit.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.exit.is_none()
    }

    /// Whether animation ticks matter on the current screen
    pub fn wants_ticks(&self) -> bool {
        matches!(self.screen, Screen::Loading | Screen::Progress)
    }

    /// Apply one event. Returns the effect the caller must carry out, if any.
    pub fn handle(&mut self, event: Event) -> Option<Effect> {
        if self.exit.is_some() {
            return None;
        }

        match (self.screen, event) {
            (_, Event::ForceQuit) => self.exit(ExitReason::Interrupted),
            (_, Event::Tick) => {
                if self.wants_ticks() {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES;
                }
                None
            }

            (Screen::Loading, Event::CatalogReady(items)) => {
                self.session = ReviewSession::new(items);
                if self.session.is_empty() {
                    self.pending = self.session.finalize();
                    self.report = Some(DeletionReport::default());
                    self.set_screen(Screen::Complete);
                } else {
                    self.set_screen(Screen::Review);
                }
                None
            }
            (Screen::Loading, Event::CatalogFailed(e)) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                self.exit(ExitReason::Fatal(message))
            }

            (Screen::Review, Event::Input(input)) => self.handle_review(input),
            (Screen::Confirm, Event::Input(input)) => self.handle_confirm(input),

            (Screen::Progress, Event::ItemRemoved { error, size, .. }) => {
                self.progress.processed += 1;
                if error.is_some() {
                    self.progress.failed += 1;
                } else {
                    self.progress.bytes_freed += size;
                }
                None
            }
            (Screen::Progress, Event::DeletionFinished(report)) => {
                self.progress.processed = report.processed();
                self.progress.failed = report.failed;
                self.progress.bytes_freed = report.bytes_freed;
                self.report = Some(report);
                self.set_screen(Screen::Complete);
                None
            }

            (Screen::Complete, Event::Input(Input::Quit)) => self.exit(ExitReason::Finished),

            (screen, event) => {
                debug!("ignored {:?} on {:?}", event, screen);
                None
            }
        }
    }

    fn handle_review(&mut self, input: Input) -> Option<Effect> {
        // Review always has a current item
        let moved = match input {
            Input::Keep => self.session.decide(Outcome::Keep),
            Input::Delete => self.session.decide(Outcome::Delete),
            Input::Skip => self.session.defer_current(),
            Input::Undo => {
                self.session.undo();
                return None;
            }
            Input::Quit => return self.exit(ExitReason::Cancelled),
            Input::ConfirmYes | Input::ConfirmNo => return None,
        };

        if let Err(e) = moved {
            debug!("review input {:?} ignored: {}", input, e);
        }

        if self.session.is_complete() {
            self.pending = self.session.finalize();
            self.set_screen(Screen::Confirm);
        }
        None
    }

    fn handle_confirm(&mut self, input: Input) -> Option<Effect> {
        match input {
            Input::ConfirmYes => {
                let plan = self
                    .pending
                    .as_ref()
                    .map(DeletionPlan::from)
                    .unwrap_or_default();
                self.progress = DeletionProgress {
                    total: plan.len(),
                    ..DeletionProgress::default()
                };
                self.set_screen(Screen::Progress);
                Some(Effect::StartDeletion(plan))
            }
            Input::ConfirmNo | Input::Quit => self.exit(ExitReason::Cancelled),
            _ => None,
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            debug!("screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    fn exit(&mut self, reason: ExitReason) -> Option<Effect> {
        debug!("exit on {:?}: {:?}", self.screen, reason);
        self.exit = Some(reason.clone());
        Some(Effect::Exit(reason))
    }
}
