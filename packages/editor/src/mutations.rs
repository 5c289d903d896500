//! # Page Mutations
//!
//! Editing operations on a page's element sequence.
//!
//! ## Design Principles
//!
//! 1. **Validated**: every mutation checks the page before touching it
//! 2. **Atomic**: a failed mutation leaves the page exactly as it was
//! 3. **Invertible**: each mutation derives its inverse from the pre-state
//!
//! ## Mutation Semantics
//!
//! ### MoveElement
//! - Splice move: remove at `from`, insert at `to` in the shortened list
//! - Top-level only; column children never cross column boundaries
//!
//! ### UpdateSettings
//! - Shallow merge: patch keys overwrite, other keys are kept
//! - The merged bag must decode into the element's typed settings
//!
//! ### RemoveElement
//! - Removes the element and, for columns, every nested child with it
//!
//! ## Structural rules
//! - Element ids are unique across the whole page, nested children included
//! - A column child's slot is below its parent's `columnCount`
//! - Columns do not nest: a column child is never itself a columns element

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use storeblocks_model::{
    BuilderElement, ColumnsSettings, ElementKind, LegalPage, ModelError, PageContent, SettingsMap,
};
use thiserror::Error;

/// Editing operations (intent-preserving)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new element to the end of the page
    AddElement { element: BuilderElement },

    /// Insert an element at a top-level position
    InsertElement { index: usize, element: BuilderElement },

    /// Append an element to one column of a columns element
    AddToColumn {
        columns_id: String,
        column_index: usize,
        element: BuilderElement,
    },

    /// Restore a column child at its previous position among the children
    InsertIntoColumn {
        columns_id: String,
        position: usize,
        element: BuilderElement,
    },

    /// Remove one child from a columns element
    RemoveFromColumn {
        columns_id: String,
        element_id: String,
    },

    /// Remove a top-level element (and its column children)
    RemoveElement { element_id: String },

    /// Splice-move a top-level element
    MoveElement { from: usize, to: usize },

    /// Shallow-merge a patch into an element's settings
    UpdateSettings {
        element_id: String,
        patch: SettingsMap,
    },

    /// Replace an element's whole settings bag
    ReplaceSettings {
        element_id: String,
        settings: SettingsMap,
    },

    /// Set a legal page's title and body
    UpdateLegal { title: String, content: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Element is not a columns element: {0}")]
    NotColumns(String),

    #[error("Columns cannot be placed inside a column")]
    NestedColumns,

    #[error("Column {column_index} is out of range for {column_count} columns")]
    ColumnOutOfRange { column_index: usize, column_count: u32 },

    #[error("Index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Page has no element sequence")]
    NoElementSequence,

    #[error("Page is not a legal page")]
    NotLegalPage,
}

impl From<ModelError> for MutationError {
    fn from(e: ModelError) -> Self {
        MutationError::InvalidSettings(e.to_string())
    }
}

impl Mutation {
    /// Apply mutation to the page with validation
    pub fn apply(&self, content: &mut PageContent) -> Result<(), MutationError> {
        self.validate(content)?;

        match self {
            Mutation::AddElement { element } => {
                elements_mut(content)?.push(element.clone());
                Ok(())
            }

            Mutation::InsertElement { index, element } => {
                elements_mut(content)?.insert(*index, element.clone());
                Ok(())
            }

            Mutation::AddToColumn {
                columns_id,
                column_index,
                element,
            } => {
                let columns = columns_mut(content, columns_id)?;
                let child = element.clone().into_column(columns_id.clone(), *column_index);
                columns.children.push(child);
                Ok(())
            }

            Mutation::InsertIntoColumn {
                columns_id,
                position,
                element,
            } => {
                let columns = columns_mut(content, columns_id)?;
                let index = (*position).min(columns.children.len());
                columns.children.insert(index, element.clone());
                Ok(())
            }

            Mutation::RemoveFromColumn {
                columns_id,
                element_id,
            } => {
                let columns = columns_mut(content, columns_id)?;
                columns.children.retain(|child| &child.id != element_id);
                Ok(())
            }

            Mutation::RemoveElement { element_id } => {
                elements_mut(content)?.retain(|element| &element.id != element_id);
                Ok(())
            }

            Mutation::MoveElement { from, to } => {
                let elements = elements_mut(content)?;
                let moved = elements.remove(*from);
                elements.insert(*to, moved);
                Ok(())
            }

            Mutation::UpdateSettings { element_id, .. }
            | Mutation::ReplaceSettings { element_id, .. } => {
                let next = self.next_kind(content)?;
                let element = find_mut(elements_mut(content)?, element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                element.kind = next;
                Ok(())
            }

            Mutation::UpdateLegal { title, content: body } => match content {
                PageContent::Legal(page) => {
                    *page = LegalPage {
                        title: title.clone(),
                        content: body.clone(),
                    };
                    Ok(())
                }
                PageContent::Elements(_) => Err(MutationError::NotLegalPage),
            },
        }
    }

    /// Validate without applying
    pub fn validate(&self, content: &PageContent) -> Result<(), MutationError> {
        if let Mutation::UpdateLegal { .. } = self {
            return match content {
                PageContent::Legal(_) => Ok(()),
                PageContent::Elements(_) => Err(MutationError::NotLegalPage),
            };
        }

        let elements = elements(content)?;

        match self {
            Mutation::AddElement { element } => validate_new_top_level(elements, element),

            Mutation::InsertElement { index, element } => {
                if *index > elements.len() {
                    return Err(MutationError::IndexOutOfRange {
                        index: *index,
                        len: elements.len(),
                    });
                }
                validate_new_top_level(elements, element)
            }

            Mutation::AddToColumn {
                columns_id,
                column_index,
                element,
            } => {
                let columns = find_columns(elements, columns_id)?;
                validate_new_child(elements, columns, *column_index, element)
            }

            Mutation::InsertIntoColumn {
                columns_id,
                element,
                ..
            } => {
                let columns = find_columns(elements, columns_id)?;
                if element.parent_id.as_deref() != Some(columns_id.as_str()) {
                    return Err(MutationError::InvalidStructure(format!(
                        "{} does not belong to {}",
                        element.id, columns_id
                    )));
                }
                validate_new_child(elements, columns, element.column_index.unwrap_or(0), element)
            }

            Mutation::RemoveFromColumn {
                columns_id,
                element_id,
            } => {
                let columns = find_columns(elements, columns_id)?;
                if columns.children.iter().any(|child| &child.id == element_id) {
                    Ok(())
                } else {
                    Err(MutationError::ElementNotFound(element_id.clone()))
                }
            }

            Mutation::RemoveElement { element_id } => {
                if elements.iter().any(|element| &element.id == element_id) {
                    Ok(())
                } else {
                    Err(MutationError::ElementNotFound(element_id.clone()))
                }
            }

            Mutation::MoveElement { from, to } => {
                for index in [*from, *to] {
                    if index >= elements.len() {
                        return Err(MutationError::IndexOutOfRange {
                            index,
                            len: elements.len(),
                        });
                    }
                }
                Ok(())
            }

            Mutation::UpdateSettings { .. } | Mutation::ReplaceSettings { .. } => {
                self.next_kind(content).map(|_| ())
            }

            Mutation::UpdateLegal { .. } => Ok(()),
        }
    }

    /// Mutation that undoes this one, computed against the page before it is applied
    pub fn to_inverse(&self, content: &PageContent) -> Result<Mutation, MutationError> {
        if let Mutation::UpdateLegal { .. } = self {
            return match content {
                PageContent::Legal(page) => Ok(Mutation::UpdateLegal {
                    title: page.title.clone(),
                    content: page.content.clone(),
                }),
                PageContent::Elements(_) => Err(MutationError::NotLegalPage),
            };
        }

        let elements = elements(content)?;

        match self {
            Mutation::AddElement { element } | Mutation::InsertElement { element, .. } => {
                Ok(Mutation::RemoveElement {
                    element_id: element.id.clone(),
                })
            }

            Mutation::AddToColumn {
                columns_id,
                element,
                ..
            }
            | Mutation::InsertIntoColumn {
                columns_id,
                element,
                ..
            } => Ok(Mutation::RemoveFromColumn {
                columns_id: columns_id.clone(),
                element_id: element.id.clone(),
            }),

            Mutation::RemoveFromColumn {
                columns_id,
                element_id,
            } => {
                let columns = find_columns(elements, columns_id)?;
                let position = columns
                    .children
                    .iter()
                    .position(|child| &child.id == element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;

                Ok(Mutation::InsertIntoColumn {
                    columns_id: columns_id.clone(),
                    position,
                    element: columns.children[position].clone(),
                })
            }

            Mutation::RemoveElement { element_id } => {
                let index = elements
                    .iter()
                    .position(|element| &element.id == element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;

                Ok(Mutation::InsertElement {
                    index,
                    element: elements[index].clone(),
                })
            }

            Mutation::MoveElement { from, to } => Ok(Mutation::MoveElement {
                from: *to,
                to: *from,
            }),

            Mutation::UpdateSettings { element_id, .. }
            | Mutation::ReplaceSettings { element_id, .. } => {
                let element = find(elements, element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;

                Ok(Mutation::ReplaceSettings {
                    element_id: element_id.clone(),
                    settings: element.kind.settings_map(),
                })
            }

            Mutation::UpdateLegal { .. } => Err(MutationError::NotLegalPage),
        }
    }

    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "add_element",
            Mutation::InsertElement { .. } => "insert_element",
            Mutation::AddToColumn { .. } => "add_to_column",
            Mutation::InsertIntoColumn { .. } => "insert_into_column",
            Mutation::RemoveFromColumn { .. } => "remove_from_column",
            Mutation::RemoveElement { .. } => "remove_element",
            Mutation::MoveElement { .. } => "move_element",
            Mutation::UpdateSettings { .. } => "update_settings",
            Mutation::ReplaceSettings { .. } => "replace_settings",
            Mutation::UpdateLegal { .. } => "update_legal",
        }
    }

    /// Settings an update or replace would leave on its target
    fn next_kind(&self, content: &PageContent) -> Result<ElementKind, MutationError> {
        let elements = elements(content)?;

        let (element_id, next) = match self {
            Mutation::UpdateSettings { element_id, patch } => {
                let element = find(elements, element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;

                if element.is_columns() && patch.contains_key("children") {
                    return Err(MutationError::InvalidSettings(
                        "column children are edited through column operations".to_string(),
                    ));
                }
                (element_id, element.kind.merged(patch)?)
            }
            Mutation::ReplaceSettings {
                element_id,
                settings,
            } => {
                let element = find(elements, element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                (element_id, element.kind.replaced(settings.clone())?)
            }
            _ => {
                return Err(MutationError::InvalidStructure(format!(
                    "{} does not change settings",
                    self.name()
                )))
            }
        };

        if let ElementKind::Columns(columns) = &next {
            let is_top_level = elements.iter().any(|element| &element.id == element_id);
            if !is_top_level {
                return Err(MutationError::NestedColumns);
            }
            validate_columns(element_id, columns, &other_ids(elements, element_id))?;
        }

        Ok(next)
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New local version number
    pub version: u64,
}

fn elements(content: &PageContent) -> Result<&Vec<BuilderElement>, MutationError> {
    match content {
        PageContent::Elements(elements) => Ok(elements),
        PageContent::Legal(_) => Err(MutationError::NoElementSequence),
    }
}

fn elements_mut(content: &mut PageContent) -> Result<&mut Vec<BuilderElement>, MutationError> {
    match content {
        PageContent::Elements(elements) => Ok(elements),
        PageContent::Legal(_) => Err(MutationError::NoElementSequence),
    }
}

/// Find an element at the top level or inside a column
pub fn find<'a>(elements: &'a [BuilderElement], id: &str) -> Option<&'a BuilderElement> {
    elements.iter().find_map(|element| {
        if element.id == id {
            Some(element)
        } else {
            element.children().iter().find(|child| child.id == id)
        }
    })
}

fn find_mut<'a>(elements: &'a mut [BuilderElement], id: &str) -> Option<&'a mut BuilderElement> {
    for element in elements.iter_mut() {
        if element.id == id {
            return Some(element);
        }
        if let Some(columns) = element.columns_mut() {
            if let Some(child) = columns.children.iter_mut().find(|child| child.id == id) {
                return Some(child);
            }
        }
    }
    None
}

fn find_columns<'a>(
    elements: &'a [BuilderElement],
    columns_id: &str,
) -> Result<&'a ColumnsSettings, MutationError> {
    let element = elements
        .iter()
        .find(|element| element.id == columns_id)
        .ok_or_else(|| MutationError::ElementNotFound(columns_id.to_string()))?;

    element
        .columns()
        .ok_or_else(|| MutationError::NotColumns(columns_id.to_string()))
}

fn columns_mut<'a>(
    content: &'a mut PageContent,
    columns_id: &str,
) -> Result<&'a mut ColumnsSettings, MutationError> {
    let element = elements_mut(content)?
        .iter_mut()
        .find(|element| element.id == columns_id)
        .ok_or_else(|| MutationError::ElementNotFound(columns_id.to_string()))?;

    element
        .columns_mut()
        .ok_or_else(|| MutationError::NotColumns(columns_id.to_string()))
}

/// Every id on the page, nested children included
fn page_ids(elements: &[BuilderElement]) -> HashSet<&str> {
    let mut ids = HashSet::new();
    for element in elements {
        ids.insert(element.id.as_str());
        for child in element.children() {
            ids.insert(child.id.as_str());
        }
    }
    ids
}

/// Page ids excluding one top-level element and its children
fn other_ids<'a>(elements: &'a [BuilderElement], excluded: &str) -> HashSet<&'a str> {
    let others: Vec<&BuilderElement> = elements.iter().filter(|e| e.id != excluded).collect();
    let mut ids = HashSet::new();
    for element in others {
        ids.insert(element.id.as_str());
        for child in element.children() {
            ids.insert(child.id.as_str());
        }
    }
    ids
}

fn validate_new_top_level(
    elements: &[BuilderElement],
    element: &BuilderElement,
) -> Result<(), MutationError> {
    if element.parent_id.is_some() || element.column_index.is_some() {
        return Err(MutationError::InvalidStructure(format!(
            "{} is tagged as a column child",
            element.id
        )));
    }

    let ids = page_ids(elements);
    if ids.contains(element.id.as_str()) {
        return Err(MutationError::DuplicateId(element.id.clone()));
    }

    if let Some(columns) = element.columns() {
        validate_columns(&element.id, columns, &ids)?;
    }

    Ok(())
}

/// Checks a whole element sequence as if each element were added in order
pub(crate) fn validate_sequence(elements: &[BuilderElement]) -> Result<(), MutationError> {
    for (i, element) in elements.iter().enumerate() {
        validate_new_top_level(&elements[..i], element)?;
    }
    Ok(())
}

fn validate_new_child(
    elements: &[BuilderElement],
    columns: &ColumnsSettings,
    column_index: usize,
    element: &BuilderElement,
) -> Result<(), MutationError> {
    if element.is_columns() {
        return Err(MutationError::NestedColumns);
    }

    if column_index >= columns.column_count as usize {
        return Err(MutationError::ColumnOutOfRange {
            column_index,
            column_count: columns.column_count,
        });
    }

    if page_ids(elements).contains(element.id.as_str()) {
        return Err(MutationError::DuplicateId(element.id.clone()));
    }

    Ok(())
}

/// Structural checks for a columns element against the rest of the page
fn validate_columns(
    columns_id: &str,
    columns: &ColumnsSettings,
    taken: &HashSet<&str>,
) -> Result<(), MutationError> {
    if columns.column_count == 0 {
        return Err(MutationError::InvalidSettings(
            "columnCount must be at least 1".to_string(),
        ));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for child in &columns.children {
        if child.is_columns() {
            return Err(MutationError::NestedColumns);
        }

        let id = child.id.as_str();
        if id == columns_id || taken.contains(id) || !seen.insert(id) {
            return Err(MutationError::DuplicateId(child.id.clone()));
        }

        let column_index = child.column_index.unwrap_or(0);
        if column_index >= columns.column_count as usize {
            return Err(MutationError::ColumnOutOfRange {
                column_index,
                column_count: columns.column_count,
            });
        }
    }

    Ok(())
}
