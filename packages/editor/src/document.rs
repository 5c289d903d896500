//! # Page Document
//!
//! The in-memory working copy of one addressed page.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Save
//!   ↓      ↓      ↓
//! Store  Mutations  Store
//! ```
//!
//! A load replaces the working sequence wholesale; there is no merge with
//! whatever the store holds. The document remembers the store revision it
//! was loaded at so a save can detect that someone else wrote in between.

use crate::mutations::{self, Mutation, MutationError, MutationResult};
use storeblocks_model::{BuilderElement, IdGenerator, PageAddress, PageContent};

/// Editable page
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// Which page this is
    pub address: PageAddress,

    /// Local version number (increments on each applied mutation)
    pub version: u64,

    /// Store revision this copy was loaded or last saved at
    revision: u64,

    content: PageContent,

    /// Unsaved local changes
    dirty: bool,

    ids: IdGenerator,
}

impl PageDocument {
    /// Document over loaded content
    pub fn new(store_id: &str, address: PageAddress, content: PageContent, revision: u64) -> Self {
        let mut ids = IdGenerator::new(&format!("{}/{}", store_id, address));
        observe_ids(&mut ids, content.elements());

        Self {
            address,
            version: 0,
            revision,
            content,
            dirty: false,
            ids,
        }
    }

    /// Document for a page that has never been saved
    pub fn empty(store_id: &str, address: PageAddress) -> Self {
        let content = PageContent::empty_for(&address);
        Self::new(store_id, address, content, 0)
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    /// Top-level elements in render order (empty for legal pages)
    pub fn elements(&self) -> &[BuilderElement] {
        self.content.elements()
    }

    pub fn has_element_sequence(&self) -> bool {
        matches!(self.content, PageContent::Elements(_))
    }

    /// Find an element at the top level or inside a column
    pub fn find(&self, id: &str) -> Option<&BuilderElement> {
        mutations::find(self.elements(), id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements().iter().position(|element| element.id == id)
    }

    /// Fresh element id, never handed out before on this page
    pub fn next_id(&mut self) -> String {
        self.ids.new_id()
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        mutation.apply(&mut self.content)?;

        self.version += 1;
        self.dirty = true;
        tracing::debug!(mutation = mutation.name(), version = self.version, "Applied mutation");

        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Replace the whole element sequence. The new sequence gets the same
    /// structural checks as added elements; a rejected one leaves the
    /// document untouched. Not recorded in any undo history.
    pub fn set_elements(&mut self, elements: Vec<BuilderElement>) -> Result<(), MutationError> {
        if !self.has_element_sequence() {
            return Err(MutationError::NoElementSequence);
        }
        mutations::validate_sequence(&elements)?;

        observe_ids(&mut self.ids, &elements);
        self.content = PageContent::Elements(elements);
        self.version += 1;
        self.dirty = true;
        Ok(())
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record a successful save at `revision`
    pub fn mark_saved(&mut self, revision: u64) {
        self.revision = revision;
        self.dirty = false;
    }
}

fn observe_ids(ids: &mut IdGenerator, elements: &[BuilderElement]) {
    for element in elements {
        ids.observe(&element.id);
        for child in element.children() {
            ids.observe(&child.id);
        }
    }
}
