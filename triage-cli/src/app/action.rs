use triage_core::{Event, Input};

/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep the current item
    Keep,
    /// Mark the current item for deletion
    Delete,
    /// Park the current item for later
    Skip,
    /// Step back one item
    Undo,
    /// Go ahead with the deletion
    ConfirmYes,
    /// Abort without deleting
    ConfirmNo,
    /// Quit the application
    Quit,
    /// Quit immediately from any screen
    ForceQuit,
    /// Timer tick for animations
    Tick,
    /// Unbound key
    None,
}

impl Action {
    /// Translate into the controller's event vocabulary
    pub fn to_event(self) -> Option<Event> {
        let event = match self {
            Action::Keep => Event::Input(Input::Keep),
            Action::Delete => Event::Input(Input::Delete),
            Action::Skip => Event::Input(Input::Skip),
            Action::Undo => Event::Input(Input::Undo),
            Action::ConfirmYes => Event::Input(Input::ConfirmYes),
            Action::ConfirmNo => Event::Input(Input::ConfirmNo),
            Action::Quit => Event::Input(Input::Quit),
            Action::ForceQuit => Event::ForceQuit,
            Action::Tick => Event::Tick,
            Action::None => return None,
        };
        Some(event)
    }
}
