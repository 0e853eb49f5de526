mod preview;
mod walker;

pub use preview::{is_code_file, is_text_file};
pub use walker::{CatalogConfig, FsCatalog, measure_directory};

use std::path::{Path, PathBuf};

use crossbeam_channel::Receiver;

use crate::error::{Result, TriageError};
use crate::item::Item;

/// Source of the items a session reviews. Called once per run.
pub trait CatalogProvider {
    fn list(&self, root: &Path) -> Result<Vec<Item>>;
}

/// Outcome of a background catalog load
#[derive(Debug)]
pub enum CatalogMessage {
    /// Listing finished
    Ready(Vec<Item>),
    /// Listing failed; the run cannot continue
    Failed(TriageError),
}

/// List `root` on a background thread. The receiver yields exactly one message.
pub fn spawn_load<P>(provider: P, root: PathBuf) -> Receiver<CatalogMessage>
where
    P: CatalogProvider + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let msg = match provider.list(&root) {
            Ok(items) => CatalogMessage::Ready(items),
            Err(e) => CatalogMessage::Failed(e),
        };
        let _ = tx.send(msg);
    });

    rx
}
