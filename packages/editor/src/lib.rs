//! # Storeblocks Editor
//!
//! Editing engine for storefront pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: BuilderElement, PageContent, catalog │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: page lifecycle + mutations          │
//! │  - Load/save through a PageStore            │
//! │  - Apply mutations with validation          │
//! │  - Undo/redo by inverse mutations           │
//! │  - Selection, column picker, preview        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: page → canvas / storefront VNodes   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Atomic edits**: a mutation either applies fully or not at all
//! 2. **Validated at the boundary**: ids, column slots and nesting are
//!    checked when the page changes, not when it is drawn
//! 3. **Explicit saves**: nothing is written until `save` is called
//! 4. **Optimistic revisions**: a save names the revision it overwrites
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storeblocks_editor::{EditSession, MemoryPageStore, TracingNotifier};
//! use storeblocks_model::{ElementType, PageAddress};
//!
//! let mut session = EditSession::new(
//!     "my-store",
//!     Arc::new(MemoryPageStore::new()),
//!     Arc::new(TracingNotifier),
//! );
//! session.open(PageAddress::Homepage).await?;
//!
//! let hero = session.add_element(ElementType::Hero)?;
//! session.set_property("title", "Summer Sale")?;
//!
//! session.save().await?;
//! ```

mod document;
mod errors;
mod file_store;
mod mutations;
mod notify;
pub mod properties;
mod session;
mod storage;
mod undo_stack;

pub use document::PageDocument;
pub use errors::EditorError;
pub use file_store::FilePageStore;
pub use mutations::{find, Mutation, MutationError, MutationResult};
pub use notify::{Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier};
pub use properties::PropertyError;
pub use session::{CanvasEvent, EditSession};
pub use storage::{MemoryPageStore, PageStore, SaveMode, StoreError, StoredPage};
pub use undo_stack::{HistoryStep, UndoStack};
