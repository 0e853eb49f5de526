use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};

use crate::item::{Item, ItemKind};
use crate::session::PendingSets;

/// Cancellation token checked between removals
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of a deletion plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRemoval {
    pub path: PathBuf,
    pub size: u64,
    pub kind: ItemKind,
}

/// Immutable list of removals, shared with the worker thread
#[derive(Debug, Clone)]
pub struct DeletionPlan {
    entries: Arc<[PlannedRemoval]>,
}

impl Default for DeletionPlan {
    fn default() -> Self {
        Self::from_items(&[])
    }
}

impl DeletionPlan {
    pub fn from_items(items: &[Item]) -> Self {
        let entries: Vec<PlannedRemoval> = items
            .iter()
            .map(|item| PlannedRemoval {
                path: item.path.clone(),
                size: item.size,
                kind: item.kind,
            })
            .collect();
        Self {
            entries: entries.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    pub fn entries(&self) -> &[PlannedRemoval] {
        &self.entries
    }
}

impl From<&PendingSets> for DeletionPlan {
    fn from(sets: &PendingSets) -> Self {
        Self::from_items(&sets.delete)
    }
}

/// Messages sent from the deletion worker
#[derive(Debug, Clone)]
pub enum DeleteMessage {
    /// One plan entry was processed
    Removed {
        path: PathBuf,
        size: u64,
        error: Option<String>,
    },
    /// Worker is done; no further messages follow
    Finished(DeletionReport),
}

/// Aggregate result of a deletion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_freed: u64,
    pub failures: Vec<(PathBuf, String)>,
    /// Entries never attempted because the run was cancelled
    pub skipped: usize,
}

impl DeletionReport {
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Removes every entry of a plan, continuing past failures
#[derive(Debug, Clone, Default)]
pub struct DeletionExecutor {
    cancel_token: CancellationToken,
}

impl DeletionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Run the plan on a worker thread.
    /// Returns a receiver for per-item messages and the worker's handle.
    pub fn spawn(self, plan: DeletionPlan) -> (Receiver<DeleteMessage>, JoinHandle<DeletionReport>) {
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = std::thread::spawn(move || self.run(&plan, &tx));

        (rx, handle)
    }

    /// Synchronous run (used by `spawn`)
    pub fn run(&self, plan: &DeletionPlan, tx: &Sender<DeleteMessage>) -> DeletionReport {
        let mut report = DeletionReport::default();

        for (i, entry) in plan.entries().iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                report.skipped = plan.len() - i;
                info!("deletion cancelled, {} entries left untouched", report.skipped);
                break;
            }

            let error = match remove_path(&entry.path) {
                Ok(()) => {
                    report.succeeded += 1;
                    report.bytes_freed += entry.size;
                    None
                }
                Err(e) => {
                    warn!("failed to remove {}: {}", entry.path.display(), e);
                    report.failed += 1;
                    report.failures.push((entry.path.clone(), e.to_string()));
                    Some(e.to_string())
                }
            };

            let _ = tx.send(DeleteMessage::Removed {
                path: entry.path.clone(),
                size: entry.size,
                error,
            });
        }

        info!(
            "deletion finished: {} removed, {} failed",
            report.succeeded, report.failed
        );
        let _ = tx.send(DeleteMessage::Finished(report.clone()));
        report
    }
}

/// Remove a file, symlink or directory tree without following links
pub fn remove_path(path: &Path) -> std::io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn plan_for(paths: &[PathBuf]) -> DeletionPlan {
        let items: Vec<Item> = paths
            .iter()
            .map(|p| Item::new(p.clone(), ItemKind::File, 3))
            .collect();
        DeletionPlan::from_items(&items)
    }

    #[test]
    fn test_empty_plan_finishes_immediately() {
        let executor = DeletionExecutor::new();
        for _ in 0..2 {
            let (rx, handle) = executor.clone().spawn(DeletionPlan::default());
            let messages: Vec<_> = rx.iter().collect();
            assert_eq!(messages.len(), 1);
            assert!(matches!(
                &messages[0],
                DeleteMessage::Finished(r) if r.succeeded == 0 && r.failed == 0
            ));
            assert_eq!(handle.join().unwrap(), DeletionReport::default());
        }
    }

    #[test]
    fn test_removes_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        let dir = temp.path().join("build");
        fs::write(&file, "abc").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/x"), "x").unwrap();

        let (rx, handle) = DeletionExecutor::new().spawn(plan_for(&[file.clone(), dir.clone()]));
        let removed = rx
            .iter()
            .filter(|m| matches!(m, DeleteMessage::Removed { error: None, .. }))
            .count();
        let report = handle.join().unwrap();

        assert_eq!(removed, 2);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(report.bytes_freed, 6);
        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_failure_does_not_stop_the_batch() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.txt");
        let present = temp.path().join("present.txt");
        fs::write(&present, "p").unwrap();

        let (tx, _rx) = crossbeam_channel::unbounded();
        let report = DeletionExecutor::new().run(&plan_for(&[missing.clone(), present.clone()]), &tx);

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].0, missing);
        assert_eq!(report.processed(), 2);
        assert!(!present.exists());
    }

    #[test]
    fn test_cancelled_before_start_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("keep-me.txt");
        fs::write(&file, "k").unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let (tx, rx) = crossbeam_channel::unbounded();
        let report = DeletionExecutor::new()
            .with_cancellation(token)
            .run(&plan_for(&[file.clone()]), &tx);

        assert_eq!(report.skipped, 1);
        assert_eq!(report.processed(), 0);
        assert!(file.exists());
        assert!(matches!(rx.recv().unwrap(), DeleteMessage::Finished(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_unlinked_not_followed() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), "i").unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        remove_path(&link).unwrap();
        assert!(!link.exists());
        assert!(target.join("inner").exists());
    }

    #[test]
    fn test_plan_is_detached_from_pending_sets() {
        let mut sets = PendingSets::default();
        sets.delete.push(Item::new(PathBuf::from("a"), ItemKind::File, 5));
        let plan = DeletionPlan::from(&sets);
        sets.delete.clear();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.total_bytes(), 5);
    }
}
