#![forbid(unsafe_code)]

//! Undo/redo of committed relocations.
//!
//! Each accepted drop pushes the distribution it replaced. Distributions are
//! cheap to keep: the catalog and item universe are shared `Arc`s, only the
//! bucket membership lists are owned.
//!
//! # Invariants
//!
//! 1. `undo.len() <= max_depth` after every operation.
//! 2. The redo stack is cleared whenever a new relocation is pushed.
//!
//! ```text
//! push(d1) push(d2)       undo                push(d3)
//! undo: [d0, d1]          undo: [d0]          undo: [d0, d2']
//! redo: []                redo: [d2]          redo: []
//! ```

use std::collections::VecDeque;

use crate::distribution::Distribution;

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Distribution>,
    redo: Vec<Distribution>,
    max_depth: usize,
}

impl History {
    /// A history keeping at most `max_depth` undo steps. Zero disables it.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth.min(64)),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record `previous` as the state before a new relocation.
    pub fn push(&mut self, previous: Distribution) {
        self.redo.clear();
        if self.max_depth == 0 {
            return;
        }
        while self.undo.len() >= self.max_depth {
            self.undo.pop_front();
        }
        self.undo.push_back(previous);
    }

    /// Step back from `current`. Returns the state to restore.
    pub fn undo(&mut self, current: Distribution) -> Option<Distribution> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Re-apply the last undone step from `current`.
    pub fn redo(&mut self, current: Distribution) -> Option<Distribution> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
