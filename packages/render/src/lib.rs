//! # Storeblocks Render
//!
//! Turns page elements into virtual DOM for two consumers:
//!
//! ```text
//!                ┌──────────────────────┐
//!                │ blocks::render_block │  one dispatch table
//!                └──────────────────────┘
//!                 ↙                    ↘
//! ┌────────────────────────┐  ┌────────────────────────┐
//! │ canvas (RenderMode::   │  │ storefront (RenderMode:│
//! │ Edit): cards, drop     │  │ :View): live products, │
//! │ zones, picker          │  │ navigator links        │
//! └────────────────────────┘  └────────────────────────┘
//!                 ↘                    ↙
//!                ┌──────────────────────┐
//!                │ html: VNode → markup │
//!                └──────────────────────┘
//! ```
//!
//! Rendering never fails. Settings always carry defaults, and element types
//! the catalog does not know render a placeholder on the canvas and nothing
//! on the storefront.

pub mod blocks;
pub mod canvas;
pub mod context;
pub mod html;
pub mod navigation;
pub mod panel;
pub mod storefront;
pub mod vdom;

#[cfg(test)]
mod tests_canvas;

#[cfg(test)]
mod tests_storefront;

pub use blocks::render_block;
pub use canvas::{render_canvas, CanvasState};
pub use context::{RenderContext, RenderMode};
pub use html::{to_document, to_html, HtmlOptions};
pub use navigation::{Navigator, PassThroughNavigator, StoreNavigator};
pub use panel::render_panel;
pub use storefront::{render_legal, render_page, render_storefront};
pub use vdom::VNode;
