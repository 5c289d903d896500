//! # Edit Session
//!
//! One owner's editing session over one addressed page at a time.
//!
//! The session owns the working document plus the transient UI state the
//! canvas needs: the selected element, the open column type-picker and the
//! preview flag. Every edit goes through the undo stack, and every outcome is
//! reported to the notifier. Failures never leave the page half-changed.
//!
//! Selection is stored by id and resolved against the document on read, so
//! after a settings update the selected element always shows the merged
//! settings, and after a removal it simply resolves to nothing.

use crate::document::PageDocument;
use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError};
use crate::notify::{Notification, Notifier};
use crate::properties;
use crate::storage::{PageStore, SaveMode, StoreError};
use crate::undo_stack::UndoStack;
use std::sync::Arc;
use storeblocks_model::catalog;
use storeblocks_model::{
    BuilderElement, ColumnSlot, CustomPageMeta, ElementType, PageAddress, PageContent, SettingsMap,
};
use tracing::{debug, info, instrument, warn};

/// Gestures coming from the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Click on an element card
    Select(String),
    /// Delete affordance on a card or a column child
    Remove(String),
    /// Drag handle released; no destination means dropped outside the list
    Drag {
        source: usize,
        destination: Option<usize>,
    },
    /// "+" in a column drop zone
    OpenColumnPicker {
        columns_id: String,
        column_index: usize,
    },
    /// Type chosen in the open picker
    PickColumnType(ElementType),
    ClosePicker,
    TogglePreview,
}

pub struct EditSession {
    store_id: String,
    store: Arc<dyn PageStore>,
    notifier: Arc<dyn Notifier>,
    document: PageDocument,
    custom_pages: Vec<CustomPageMeta>,
    selected: Option<String>,
    picker: Option<ColumnSlot>,
    preview: bool,
    history: UndoStack,
}

impl EditSession {
    /// Session on an empty, unloaded homepage; call [`EditSession::open`] to load
    pub fn new(
        store_id: impl Into<String>,
        store: Arc<dyn PageStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store_id = store_id.into();
        let document = PageDocument::empty(&store_id, PageAddress::Homepage);

        Self {
            store_id,
            store,
            notifier,
            document,
            custom_pages: Vec::new(),
            selected: None,
            picker: None,
            preview: false,
            history: UndoStack::new(),
        }
    }

    pub fn with_undo_levels(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    // ---------------------------------------------------------------------
    // Page lifecycle
    // ---------------------------------------------------------------------

    /// Load a page, replacing the working copy wholesale
    #[instrument(skip(self), fields(store = %self.store_id))]
    pub async fn open(&mut self, address: PageAddress) -> Result<(), EditorError> {
        if matches!(address, PageAddress::Custom(_)) {
            self.refresh_custom_pages().await?;
        }

        let stored = match self.store.load_page(&self.store_id, &address).await {
            Ok(stored) => stored,
            Err(e) => {
                self.notify_error(format!("Failed to load page: {}", e));
                return Err(e.into());
            }
        };

        info!(revision = stored.revision, "Opened page");
        self.document = PageDocument::new(&self.store_id, address, stored.content, stored.revision);
        self.selected = None;
        self.picker = None;
        self.history.clear();
        Ok(())
    }

    /// Re-read the custom page list used by the page selector
    pub async fn refresh_custom_pages(&mut self) -> Result<(), EditorError> {
        match self.store.list_custom_pages(&self.store_id).await {
            Ok(pages) => {
                self.custom_pages = pages;
                Ok(())
            }
            Err(e) => {
                self.notify_error(format!("Failed to load pages: {}", e));
                Err(e.into())
            }
        }
    }

    /// Save against the revision the page was loaded at
    pub async fn save(&mut self) -> Result<u64, EditorError> {
        let mode = SaveMode::IfRevision(self.document.revision());
        self.save_with(mode).await
    }

    /// Save the working copy. On failure the local edits are kept.
    #[instrument(skip(self), fields(store = %self.store_id, address = %self.document.address))]
    pub async fn save_with(&mut self, mode: SaveMode) -> Result<u64, EditorError> {
        let result = self
            .store
            .save_page(
                &self.store_id,
                &self.document.address,
                self.document.content(),
                mode,
            )
            .await;

        match result {
            Ok(revision) => {
                self.document.mark_saved(revision);
                info!(revision, "Saved page");
                self.notifier.notify(Notification::success("Page saved"));
                Ok(revision)
            }
            Err(StoreError::Conflict { expected, actual }) => {
                self.notify_error(format!(
                    "Page was changed elsewhere (revision {} is now {}); reload or force the save",
                    expected, actual
                ));
                Err(StoreError::Conflict { expected, actual }.into())
            }
            Err(e) => {
                self.notify_error(format!("Failed to save page: {}", e));
                Err(e.into())
            }
        }
    }

    /// Register a new custom page and refresh the page list
    pub async fn create_custom_page(
        &mut self,
        title: &str,
        slug: Option<&str>,
    ) -> Result<CustomPageMeta, EditorError> {
        let page = match self.store.create_custom_page(&self.store_id, title, slug).await {
            Ok(page) => page,
            Err(e) => {
                self.notify_error(format!("Failed to create page: {}", e));
                return Err(e.into());
            }
        };

        self.refresh_custom_pages().await?;
        self.notifier
            .notify(Notification::success(format!("Page \"{}\" created", page.title)));
        Ok(page)
    }

    // ---------------------------------------------------------------------
    // Editing operations
    // ---------------------------------------------------------------------

    /// Append a new element from the catalog and select it
    pub fn add_element(&mut self, element_type: ElementType) -> Result<String, EditorError> {
        let id = self.document.next_id();
        let element = catalog::instantiate(element_type, id.clone());

        self.apply(Mutation::AddElement { element })?;
        self.selected = Some(id.clone());
        self.notifier.notify(Notification::success(format!(
            "{} added",
            catalog::label(element_type)
        )));
        Ok(id)
    }

    /// [`EditSession::add_element`] by wire tag, as the element palette sends it
    pub fn add_element_by_tag(&mut self, type_tag: &str) -> Result<String, EditorError> {
        match type_tag.parse::<ElementType>() {
            Ok(element_type) => self.add_element(element_type),
            Err(e) => {
                self.notify_error(format!("Failed to add element: {}", e));
                Err(e.into())
            }
        }
    }

    /// Append a new element into one column slot.
    ///
    /// A target that is missing or not a columns element is skipped:
    /// `Ok(None)`, no notification. Selection is left alone.
    pub fn add_element_to_column(
        &mut self,
        columns_id: &str,
        column_index: usize,
        element_type: ElementType,
    ) -> Result<Option<String>, EditorError> {
        let is_columns = self
            .document
            .elements()
            .iter()
            .any(|element| element.id == columns_id && element.is_columns());
        if !is_columns {
            debug!(columns_id, "Skipping column add on non-columns target");
            return Ok(None);
        }

        let id = self.document.next_id();
        let element = catalog::instantiate(element_type, id.clone());
        self.apply(Mutation::AddToColumn {
            columns_id: columns_id.to_string(),
            column_index,
            element,
        })?;

        self.notifier.notify(Notification::success(format!(
            "{} added to column {}",
            catalog::label(element_type),
            column_index + 1
        )));
        Ok(Some(id))
    }

    /// Remove an element. Top-level elements take their column children with
    /// them; a column child is removed from its columns element.
    pub fn remove_element(&mut self, id: &str) -> Result<bool, EditorError> {
        if self.document.position(id).is_none() {
            let parent = self
                .document
                .find(id)
                .and_then(|element| element.parent_id.clone());

            return match parent {
                Some(columns_id) => self.remove_from_column(&columns_id, id),
                None => Ok(false),
            };
        }

        self.apply(Mutation::RemoveElement {
            element_id: id.to_string(),
        })?;
        self.forget_missing();
        self.notifier.notify(Notification::success("Element removed"));
        Ok(true)
    }

    pub fn remove_from_column(&mut self, columns_id: &str, element_id: &str) -> Result<bool, EditorError> {
        self.apply(Mutation::RemoveFromColumn {
            columns_id: columns_id.to_string(),
            element_id: element_id.to_string(),
        })?;
        self.forget_missing();
        self.notifier.notify(Notification::success("Element removed"));
        Ok(true)
    }

    /// Splice-move a top-level element. No destination, or dropping in place,
    /// changes nothing.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> Result<bool, EditorError> {
        let Some(destination) = destination else {
            return Ok(false);
        };
        if source == destination {
            return Ok(false);
        }

        self.apply(Mutation::MoveElement {
            from: source,
            to: destination,
        })?;
        Ok(true)
    }

    /// Shallow-merge a patch into an element's settings. An empty patch is a
    /// no-op.
    pub fn update_element_settings(&mut self, id: &str, patch: SettingsMap) -> Result<bool, EditorError> {
        if patch.is_empty() {
            return Ok(false);
        }

        self.apply(Mutation::UpdateSettings {
            element_id: id.to_string(),
            patch,
        })?;
        Ok(true)
    }

    /// Properties panel field change on the selected element
    pub fn set_property(&mut self, key: &str, raw: &str) -> Result<bool, EditorError> {
        let Some(element) = self.selected() else {
            return Err(EditorError::NothingSelected);
        };

        let id = element.id.clone();
        let patch = match properties::field_patch(element, key, raw) {
            Ok(patch) => patch,
            Err(e) => {
                self.notify_error(format!("Invalid value: {}", e));
                return Err(e.into());
            }
        };

        self.update_element_settings(&id, patch)
    }

    /// Edit a legal page's title and body
    pub fn update_legal(&mut self, title: &str, content: &str) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateLegal {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.history.undo(&mut self.document)?;
        self.forget_missing();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.history.redo(&mut self.document)?;
        self.forget_missing();
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    // ---------------------------------------------------------------------
    // Canvas state
    // ---------------------------------------------------------------------

    /// Select an element. Ignored in preview mode or for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if self.preview || self.document.find(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected element as it is now
    pub fn selected(&self) -> Option<&BuilderElement> {
        self.selected
            .as_deref()
            .and_then(|id| self.document.find(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|element| element.id.as_str())
    }

    /// Open column type-picker, if any
    pub fn picker(&self) -> Option<&ColumnSlot> {
        self.picker.as_ref()
    }

    pub fn preview(&self) -> bool {
        self.preview
    }

    /// Dispatch a canvas gesture
    pub fn handle(&mut self, event: CanvasEvent) -> Result<(), EditorError> {
        match event {
            CanvasEvent::Select(id) => {
                self.select(&id);
            }

            CanvasEvent::Remove(id) => {
                if !self.preview {
                    self.remove_element(&id)?;
                }
            }

            CanvasEvent::Drag {
                source,
                destination,
            } => {
                if !self.preview {
                    self.reorder(source, destination)?;
                }
            }

            CanvasEvent::OpenColumnPicker {
                columns_id,
                column_index,
            } => {
                let in_range = self
                    .document
                    .find(&columns_id)
                    .and_then(|element| element.columns())
                    .map(|columns| column_index < columns.column_count as usize)
                    .unwrap_or(false);

                if !self.preview && in_range {
                    self.picker = Some(ColumnSlot {
                        columns_id,
                        column_index,
                    });
                }
            }

            CanvasEvent::PickColumnType(element_type) => {
                if let Some(slot) = self.picker.take() {
                    self.add_element_to_column(&slot.columns_id, slot.column_index, element_type)?;
                }
            }

            CanvasEvent::ClosePicker => self.picker = None,

            CanvasEvent::TogglePreview => {
                self.preview = !self.preview;
                if self.preview {
                    self.selected = None;
                    self.picker = None;
                }
            }
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn address(&self) -> &PageAddress {
        &self.document.address
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    /// Top-level elements of the open page
    pub fn elements(&self) -> &[BuilderElement] {
        self.document.elements()
    }

    pub fn content(&self) -> &PageContent {
        self.document.content()
    }

    pub fn custom_pages(&self) -> &[CustomPageMeta] {
        &self.custom_pages
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    fn apply(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        if let Err(e) = self.history.apply(&mutation, &mut self.document) {
            warn!(mutation = mutation.name(), error = %e, "Mutation rejected");
            self.notify_error(describe_failure(&mutation, &e));
            return Err(e.into());
        }
        Ok(())
    }

    /// Drop selection and picker state that points at removed elements
    fn forget_missing(&mut self) {
        if self.selected().is_none() {
            self.selected = None;
        }

        let picker_valid = self.picker.as_ref().is_some_and(|slot| {
            self.document
                .find(&slot.columns_id)
                .is_some_and(|element| element.is_columns())
        });
        if !picker_valid {
            self.picker = None;
        }
    }

    fn notify_error(&self, message: String) {
        self.notifier.notify(Notification::error(message));
    }
}

fn describe_failure(mutation: &Mutation, error: &MutationError) -> String {
    let action = match mutation {
        Mutation::AddElement { .. }
        | Mutation::InsertElement { .. }
        | Mutation::AddToColumn { .. }
        | Mutation::InsertIntoColumn { .. } => "add element",
        Mutation::RemoveElement { .. } | Mutation::RemoveFromColumn { .. } => "remove element",
        Mutation::MoveElement { .. } => "move element",
        Mutation::UpdateSettings { .. } | Mutation::ReplaceSettings { .. } => "update element",
        Mutation::UpdateLegal { .. } => "update page",
    };
    format!("Failed to {}: {}", action, error)
}
