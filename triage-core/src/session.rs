//! Review session: ordered items, a cursor, and per-item decisions.
//!
//! The cursor walks the catalog once from front to back. Deciding or
//! deferring moves it forward past any parked (deferred) entries; `undo`
//! steps back exactly one slot and clears whatever was recorded there.
//! When the cursor reaches `len()` the sweep is over and [`ReviewSession::finalize`]
//! derives the pending sets.

use log::debug;

use crate::error::{Result, TriageError};
use crate::item::{Decision, Item, Outcome};

/// Sets derived once the sweep is over
#[derive(Debug, Clone, Default)]
pub struct PendingSets {
    /// Items marked for deletion, in catalog order
    pub delete: Vec<Item>,
    /// Items skipped for later and never decided
    pub deferred: Vec<Item>,
    /// Total size of `delete`
    pub delete_bytes: u64,
}

impl PendingSets {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty()
    }
}

/// Traversal and decision state for one run
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    items: Vec<Item>,
    cursor: usize,
}

impl ReviewSession {
    pub fn new(items: Vec<Item>) -> Self {
        let mut items = items;
        for item in &mut items {
            item.reset();
        }
        Self { items, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// True once the cursor has run off the end
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.items.len()
    }

    /// Item under the cursor, if the sweep is not over
    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    /// 1-based position of the cursor and the total, for display
    pub fn position(&self) -> (usize, usize) {
        ((self.cursor + 1).min(self.items.len()), self.items.len())
    }

    /// Record a final keep/delete for the current item and move on
    pub fn decide(&mut self, outcome: Outcome) -> Result<()> {
        let cursor = self.cursor;
        let item = self
            .items
            .get_mut(cursor)
            .ok_or(TriageError::ReviewComplete)?;

        item.decision = Decision::from(outcome);
        item.deferred = false;
        debug!("decided {:?} for {}", outcome, item.path.display());

        self.advance();
        Ok(())
    }

    /// Park the current item for later without deciding it
    pub fn defer_current(&mut self) -> Result<()> {
        let cursor = self.cursor;
        let item = self
            .items
            .get_mut(cursor)
            .ok_or(TriageError::ReviewComplete)?;

        item.deferred = true;
        debug!("deferred {}", item.path.display());

        self.advance();
        Ok(())
    }

    /// Step back one slot and clear that item. Returns false at the start.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        let item = &mut self.items[self.cursor];
        item.reset();
        debug!("undo to #{} {}", self.cursor, item.path.display());
        true
    }

    /// Move to the next non-deferred item, or to the end
    fn advance(&mut self) {
        let mut next = self.cursor + 1;
        while next < self.items.len() && self.items[next].deferred {
            next += 1;
        }
        self.cursor = next.min(self.items.len());
    }

    /// Derive the pending sets. `None` while the sweep is still running.
    pub fn finalize(&self) -> Option<PendingSets> {
        if !self.is_complete() {
            return None;
        }

        let mut sets = PendingSets::default();
        for item in &self.items {
            match item.decision {
                Decision::Delete => {
                    sets.delete_bytes = sets.delete_bytes.saturating_add(item.size);
                    sets.delete.push(item.clone());
                }
                Decision::Undecided if item.deferred => sets.deferred.push(item.clone()),
                _ => {}
            }
        }

        debug!(
            "sweep finished: {} to delete, {} deferred",
            sets.delete.len(),
            sets.deferred.len()
        );
        Some(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, ItemStatus};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .map(|n| Item::new(PathBuf::from(n), ItemKind::File, 10))
            .collect()
    }

    fn names(items: &[Item]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_empty_session_is_complete() {
        let session = ReviewSession::new(Vec::new());
        assert!(session.is_complete());
        assert!(session.current().is_none());
        let sets = session.finalize().unwrap();
        assert!(sets.delete.is_empty());
        assert!(sets.deferred.is_empty());
    }

    #[test]
    fn test_skip_then_delete() {
        let mut session = ReviewSession::new(items(&["fileA", "fileB"]));
        session.defer_current().unwrap();
        assert_eq!(session.cursor(), 1);
        session.decide(Outcome::Delete).unwrap();
        assert_eq!(session.cursor(), 2);

        let sets = session.finalize().unwrap();
        assert_eq!(names(&sets.delete), vec!["fileB"]);
        assert_eq!(names(&sets.deferred), vec!["fileA"]);
        assert_eq!(sets.delete_bytes, 10);
    }

    #[test]
    fn test_keep_then_undo() {
        let mut session = ReviewSession::new(items(&["fileA", "fileB"]));
        session.decide(Outcome::Keep).unwrap();
        assert_eq!(session.cursor(), 1);

        assert!(session.undo());
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.items()[0].status(), ItemStatus::Undecided);
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut session = ReviewSession::new(items(&["fileA"]));
        assert!(!session.undo());
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_undo_revisits_deferred_item() {
        let mut session = ReviewSession::new(items(&["a", "b"]));
        session.defer_current().unwrap();
        assert!(session.undo());
        assert_eq!(session.cursor(), 0);
        assert!(!session.items()[0].is_deferred());
        session.decide(Outcome::Delete).unwrap();
        assert_eq!(session.items()[0].status(), ItemStatus::Deleted);
    }

    #[test]
    fn test_decide_at_end_is_error() {
        let mut session = ReviewSession::new(items(&["a"]));
        session.decide(Outcome::Keep).unwrap();
        assert!(matches!(
            session.decide(Outcome::Delete),
            Err(TriageError::ReviewComplete)
        ));
        assert!(session.defer_current().is_err());
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_advance_skips_parked_items() {
        let mut session = ReviewSession::new(items(&["a", "b", "c", "d"]));
        session.items[1].deferred = true;
        session.items[2].deferred = true;
        session.decide(Outcome::Keep).unwrap();
        assert_eq!(session.cursor(), 3);
        assert_eq!(session.current().unwrap().name, "d");
    }

    #[test]
    fn test_advance_to_end_over_parked_tail() {
        let mut session = ReviewSession::new(items(&["a", "b"]));
        session.items[1].deferred = true;
        session.decide(Outcome::Delete).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn test_finalize_requires_complete_sweep() {
        let session = ReviewSession::new(items(&["a"]));
        assert!(session.finalize().is_none());
    }

    #[test]
    fn test_new_resets_incoming_state() {
        let mut list = items(&["a"]);
        list[0].decision = Decision::Delete;
        list[0].deferred = true;
        let session = ReviewSession::new(list);
        assert_eq!(session.items()[0].status(), ItemStatus::Undecided);
    }

    #[test]
    fn test_position() {
        let mut session = ReviewSession::new(items(&["a", "b"]));
        assert_eq!(session.position(), (1, 2));
        session.decide(Outcome::Keep).unwrap();
        session.decide(Outcome::Keep).unwrap();
        assert_eq!(session.position(), (2, 2));
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Keep,
        Delete,
        Skip,
        Undo,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Keep),
            Just(Op::Delete),
            Just(Op::Skip),
            Just(Op::Undo),
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_and_sets_stay_consistent(
            len in 0usize..8,
            ops in proptest::collection::vec(op(), 0..40),
        ) {
            let list: Vec<Item> = (0..len)
                .map(|i| Item::new(PathBuf::from(format!("f{i}")), ItemKind::File, i as u64))
                .collect();
            let mut session = ReviewSession::new(list);

            for op in ops {
                let forward = !matches!(op, Op::Undo);
                let _ = match op {
                    Op::Keep => session.decide(Outcome::Keep),
                    Op::Delete => session.decide(Outcome::Delete),
                    Op::Skip => session.defer_current(),
                    Op::Undo => {
                        session.undo();
                        Ok(())
                    }
                };

                prop_assert!(session.cursor() <= session.len());
                if let (true, Some(current)) = (forward, session.current()) {
                    prop_assert!(!current.is_deferred());
                }
                for item in &session.items()[..session.cursor()] {
                    prop_assert_ne!(item.status(), ItemStatus::Undecided);
                }
            }

            if let Some(sets) = session.finalize() {
                let deleted: Vec<_> = session
                    .items()
                    .iter()
                    .filter(|i| i.status() == ItemStatus::Deleted)
                    .map(|i| i.path.clone())
                    .collect();
                let planned: Vec<_> = sets.delete.iter().map(|i| i.path.clone()).collect();
                prop_assert_eq!(deleted, planned);
                prop_assert!(sets.deferred.iter().all(|i| i.status() == ItemStatus::Deferred));
            }
        }
    }
}
