//! # Storeblocks Model
//!
//! Document model for the storefront page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: ElementType → template + schema    │
//! └─────────────────────────────────────────────┘
//!                     ↓ instantiate
//! ┌─────────────────────────────────────────────┐
//! │ element: BuilderElement (typed settings)    │
//! │  - columns own nested children              │
//! │  - unknown types preserved verbatim         │
//! └─────────────────────────────────────────────┘
//!                     ↓ ordered
//! ┌─────────────────────────────────────────────┐
//! │ page: PageAddress + PageContent             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The editor mutates this model and the renderers observe it. Nothing in
//! this crate performs I/O.

pub mod catalog;
mod de;
pub mod element;
pub mod error;
pub mod id_generator;
pub mod page;
pub mod product;
pub mod settings;

pub use catalog::{FieldKind, FieldSpec};
pub use element::{BuilderElement, ElementKind, ElementType};
pub use error::ModelError;
pub use id_generator::IdGenerator;
pub use page::{ColumnSlot, CustomPageMeta, LegalKey, LegalPage, PageAddress, PageContent};
pub use product::Product;
pub use settings::*;

/// Settings bag as stored on the wire
pub type SettingsMap = serde_json::Map<String, serde_json::Value>;
