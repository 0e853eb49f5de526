pub mod catalog;
pub mod controller;
pub mod error;
pub mod executor;
pub mod format;
pub mod highlight;
pub mod item;
pub mod session;

pub use catalog::{
    CatalogConfig, CatalogMessage, CatalogProvider, FsCatalog, is_code_file, is_text_file,
    measure_directory, spawn_load,
};
pub use controller::{
    Controller, DeletionProgress, Effect, Event, ExitReason, Input, SPINNER_FRAMES, Screen,
};
pub use error::{Result, TriageError};
pub use executor::{
    CancellationToken, DeleteMessage, DeletionExecutor, DeletionPlan, DeletionReport,
    PlannedRemoval,
};
pub use format::{format_count, format_mtime, format_size, truncate_left};
pub use highlight::{HighlightedLine, Highlighter, SyntaxHighlighter, Span, TokenKind};
pub use item::{Decision, Item, ItemKind, ItemStatus, Outcome};
pub use session::{PendingSets, ReviewSession};
