//! # Undo/Redo Stack
//!
//! Page edit history. Every applied mutation is recorded together with the
//! inverse derived from the content it was applied to, so stepping back
//! never needs a snapshot of the page.
//!
//! Several mutations can be grouped into one labelled step with
//! [`UndoStack::begin_group`] / [`UndoStack::end_group`]; undo then reverts
//! them together. Recording a new step discards everything that was undone.
//!
//! ```rust,ignore
//! let mut history = UndoStack::new();
//! history.apply(&Mutation::MoveElement { from: 0, to: 2 }, &mut doc)?;
//! history.undo(&mut doc)?;
//! history.redo(&mut doc)?;
//! ```

use crate::{Mutation, MutationError, MutationResult, PageDocument};
use std::collections::VecDeque;
use tracing::debug;

/// One undoable step: mutations in application order plus their inverses
/// in undo order
#[derive(Debug, Clone)]
pub struct HistoryStep {
    pub label: String,
    forward: Vec<Mutation>,
    backward: Vec<Mutation>,
}

impl HistoryStep {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            forward: Vec::new(),
            backward: Vec::new(),
        }
    }

    fn record(&mut self, mutation: Mutation, inverse: Mutation) {
        self.forward.push(mutation);
        self.backward.insert(0, inverse);
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[derive(Debug)]
pub struct UndoStack {
    done: VecDeque<HistoryStep>,
    undone: Vec<HistoryStep>,
    /// 0 keeps every step
    max_levels: usize,
    open_group: Option<HistoryStep>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            done: VecDeque::new(),
            undone: Vec::new(),
            max_levels,
            open_group: None,
        }
    }

    /// Apply a mutation to the document and record it. A rejected mutation
    /// leaves both the document and the history untouched.
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        doc: &mut PageDocument,
    ) -> Result<MutationResult, MutationError> {
        let inverse = mutation.to_inverse(doc.content())?;
        let result = doc.apply(mutation)?;

        match &mut self.open_group {
            Some(group) => group.record(mutation.clone(), inverse),
            None => {
                let mut step = HistoryStep::new(mutation.name());
                step.record(mutation.clone(), inverse);
                self.push(step);
            }
        }

        Ok(result)
    }

    /// Record the following mutations as one step until [`UndoStack::end_group`]
    pub fn begin_group(&mut self, label: impl Into<String>) {
        self.end_group();
        self.open_group = Some(HistoryStep::new(label));
    }

    pub fn end_group(&mut self) {
        if let Some(group) = self.open_group.take() {
            if !group.is_empty() {
                self.push(group);
            }
        }
    }

    fn push(&mut self, step: HistoryStep) {
        self.done.push_back(step);
        if self.max_levels > 0 {
            while self.done.len() > self.max_levels {
                self.done.pop_front();
            }
        }
        self.undone.clear();
    }

    /// Revert the latest step. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut PageDocument) -> Result<bool, MutationError> {
        self.end_group();
        let Some(step) = self.done.pop_back() else {
            return Ok(false);
        };

        self.replay(doc, &step.backward)?;
        debug!(step = %step.label, "Undid step");
        self.undone.push(step);
        Ok(true)
    }

    /// Re-apply the latest undone step. `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, doc: &mut PageDocument) -> Result<bool, MutationError> {
        let Some(step) = self.undone.pop() else {
            return Ok(false);
        };

        self.replay(doc, &step.forward)?;
        debug!(step = %step.label, "Redid step");
        self.done.push_back(step);
        Ok(true)
    }

    /// A replay only fails when the content was replaced outside the
    /// history; the history is dropped in that case.
    fn replay(&mut self, doc: &mut PageDocument, mutations: &[Mutation]) -> Result<(), MutationError> {
        for mutation in mutations {
            if let Err(e) = doc.apply(mutation) {
                self.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.done.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.undone.len()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.done.back().map(|step| step.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.undone.last().map(|step| step.label.as_str())
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
        self.open_group = None;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
