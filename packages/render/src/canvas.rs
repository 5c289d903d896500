//! # Canvas Renderer
//!
//! Editor-facing view of a page. Every top-level element becomes a card
//! carrying the affordances the editor wires gestures to:
//!
//! | Affordance | Marker |
//! |---|---|
//! | select | `data-action="select"` on the card |
//! | reorder | `data-action="drag"` handle, `data-index` on the card |
//! | delete | `data-action="remove"` button |
//! | add to column | `data-action="open-column-picker"` per drop zone |
//!
//! Preview mode draws the same cards without any affordance and without the
//! selection marker.

use crate::blocks::{element_label, render_block};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::catalog;
use storeblocks_model::{BuilderElement, ColumnSlot, ElementType};
use tracing::instrument;

/// Transient editor state the canvas reflects
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasState<'a> {
    pub selected: Option<&'a str>,
    pub preview: bool,
    /// Open column type-picker
    pub picker: Option<&'a ColumnSlot>,
}

#[instrument(skip_all, fields(elements = elements.len(), preview = state.preview))]
pub fn render_canvas(elements: &[BuilderElement], state: &CanvasState) -> VNode {
    let ctx = RenderContext::edit()
        .with_selected(state.selected)
        .with_preview(state.preview);

    let mut canvas = VNode::element("div").with_class("sb-canvas");
    if state.preview {
        canvas = canvas.with_class("sb-canvas--preview");
    }

    if elements.is_empty() {
        return canvas.with_class("sb-canvas--empty").with_child(empty_state());
    }

    let cards = elements
        .iter()
        .enumerate()
        .map(|(index, element)| card(element, index, &ctx));
    canvas = canvas.with_children(cards);

    if let Some(slot) = state.picker.filter(|_| ctx.editable()) {
        canvas = canvas.with_child(picker(slot));
    }

    canvas
}

fn card(element: &BuilderElement, index: usize, ctx: &RenderContext) -> VNode {
    let mut card = VNode::element("div")
        .with_class("sb-card")
        .with_key(element.id.clone())
        .with_attr("data-element-id", element.id.as_str())
        .with_attr("data-element-type", element.type_tag())
        .with_attr("data-index", index.to_string());

    if ctx.is_selected(&element.id) {
        card = card
            .with_class("sb-card--selected")
            .with_attr("data-selected", "true");
    }

    if ctx.editable() {
        card = card
            .with_attr("data-action", "select")
            .with_attr("draggable", "true")
            .with_child(toolbar(element));
    }

    let body = VNode::element("div")
        .with_class("sb-card__body")
        .with_children(render_block(element, ctx));

    card.with_child(body)
}

fn toolbar(element: &BuilderElement) -> VNode {
    VNode::element("div")
        .with_class("sb-card__toolbar")
        .with_child(
            VNode::element("span")
                .with_class("sb-card__handle")
                .with_attr("data-action", "drag")
                .with_attr("aria-label", "Drag to reorder")
                .with_child(VNode::text("⠿")),
        )
        .with_child(
            VNode::element("span")
                .with_class("sb-card__label")
                .with_child(VNode::text(element_label(element))),
        )
        .with_child(
            VNode::element("button")
                .with_class("sb-card__delete")
                .with_attr("type", "button")
                .with_attr("data-action", "remove")
                .with_attr("data-element-id", element.id.as_str())
                .with_child(VNode::text("Delete")),
        )
}

/// Type list for one column slot. Columns are not offered; they do not nest.
fn picker(slot: &ColumnSlot) -> VNode {
    let options = ElementType::ALL
        .into_iter()
        .filter(|ty| *ty != ElementType::Columns)
        .map(|ty| {
            VNode::element("button")
                .with_class("sb-picker__option")
                .with_attr("type", "button")
                .with_attr("data-action", "pick-column-type")
                .with_attr("data-element-type", ty.as_str())
                .with_child(VNode::text(catalog::label(ty)))
        });

    VNode::element("div")
        .with_class("sb-picker")
        .with_attr("role", "dialog")
        .with_attr("data-columns-id", slot.columns_id.as_str())
        .with_attr("data-column-index", slot.column_index.to_string())
        .with_child(
            VNode::element("h3")
                .with_child(VNode::text(format!("Add to column {}", slot.column_index + 1))),
        )
        .with_child(VNode::element("div").with_class("sb-picker__options").with_children(options))
        .with_child(
            VNode::element("button")
                .with_class("sb-picker__close")
                .with_attr("type", "button")
                .with_attr("data-action", "close-picker")
                .with_child(VNode::text("Cancel")),
        )
}

fn empty_state() -> VNode {
    VNode::element("div")
        .with_class("sb-empty-state")
        .with_child(VNode::element("h3").with_child(VNode::text("This page is empty")))
        .with_child(
            VNode::element("p")
                .with_child(VNode::text("Add elements from the sidebar to start building your page.")),
        )
}
