//! Undo/Redo over whole-state snapshots.
//!
//! `commit` pushes the pre-change state onto the past stack and clears the
//! future. Undo and redo swap the current state with the top of the
//! opposite stack.
//!
//! Drag gestures use **snapshot batching**: the state is captured at the
//! start of the gesture, live updates replace the current state without
//! touching the stacks, and the gesture lands as a single undo step when
//! the batch closes.

use std::mem;

/// Two-stack linear history. `S` is cloned into the stacks, so every
/// snapshot is independent of the live state.
#[derive(Debug)]
pub struct History<S> {
    past: Vec<S>,
    future: Vec<S>,
    current: S,
    /// Maximum undo depth.
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// State captured at the start of a batch.
    batch_snapshot: Option<S>,
}

impl<S: Clone + PartialEq> History<S> {
    pub fn new(initial: S, max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            current: initial,
            max_depth: max_depth.max(1),
            batch_depth: 0,
            batch_snapshot: None,
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// Make `next` the current state.
    ///
    /// Outside a batch, the previous state goes onto the past stack and the
    /// future stack is discarded. Inside a batch the state is replaced
    /// live and recorded when the batch ends.
    pub fn commit(&mut self, next: S) {
        if self.batch_depth > 0 {
            self.current = next;
            return;
        }
        let prev = mem::replace(&mut self.current, next);
        self.push_past(prev);
        self.future.clear();
        log::trace!("commit: {} undo / 0 redo", self.past.len());
    }

    /// Start a batch group. All commits until `end_batch()` become one step.
    pub fn begin_batch(&mut self) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some(self.current.clone());
        }
        self.batch_depth += 1;
    }

    /// End a batch group. When the outermost batch closes and the state
    /// changed, the pre-batch snapshot is pushed as one undo step.
    pub fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0
            && let Some(before) = self.batch_snapshot.take()
            && before != self.current
        {
            self.push_past(before);
            self.future.clear();
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    /// Restore the most recent past state. Returns `false` if there is
    /// nothing to undo. An open batch is closed first.
    pub fn undo(&mut self) -> bool {
        self.close_batches();
        let Some(prev) = self.past.pop() else {
            return false;
        };
        let cur = mem::replace(&mut self.current, prev);
        self.future.push(cur);
        log::trace!("undo: {} undo / {} redo", self.past.len(), self.future.len());
        true
    }

    /// Re-apply the most recently undone state. Returns `false` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.close_batches();
        let Some(next) = self.future.pop() else {
            return false;
        };
        let cur = mem::replace(&mut self.current, next);
        self.push_past(cur);
        log::trace!("redo: {} undo / {} redo", self.past.len(), self.future.len());
        true
    }

    /// Drop both stacks and set the current state directly.
    pub fn reset_history(&mut self, state: S) {
        self.past.clear();
        self.future.clear();
        self.batch_depth = 0;
        self.batch_snapshot = None;
        self.current = state;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    fn push_past(&mut self, state: S) {
        self.past.push(state);
        if self.past.len() > self.max_depth {
            self.past.remove(0);
        }
    }

    fn close_batches(&mut self) {
        while self.batch_depth > 0 {
            self.end_batch();
        }
    }
}
