//! # Storefront Renderer
//!
//! Customer-facing view of a page. Data-bound blocks resolve against the
//! supplied product list, links are routed through the navigator, and
//! elements of unknown type are skipped.

use crate::blocks::render_block;
use crate::context::{RenderContext, RenderMode};
use crate::vdom::VNode;
use storeblocks_model::{BuilderElement, LegalPage};
use tracing::instrument;

/// Render a page's elements in order. An empty page renders nothing.
#[instrument(skip_all, fields(store = ctx.store_id, elements = elements.len()))]
pub fn render_storefront(elements: &[BuilderElement], ctx: &RenderContext) -> Vec<VNode> {
    let ctx = RenderContext {
        mode: RenderMode::View,
        preview: false,
        selected: None,
        ..*ctx
    };

    elements
        .iter()
        .filter_map(|element| render_block(element, &ctx))
        .collect()
}

/// [`render_storefront`] wrapped in the page's `<main>` landmark
pub fn render_page(elements: &[BuilderElement], ctx: &RenderContext) -> VNode {
    VNode::element("main")
        .with_class("sb-storefront")
        .with_attr("data-store-id", ctx.store_id)
        .with_children(render_storefront(elements, ctx))
}

/// Legal page body. Blank lines separate paragraphs.
pub fn render_legal(page: &LegalPage) -> VNode {
    let paragraphs = page
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            VNode::element("p")
                .with_style("white-space", "pre-line")
                .with_child(VNode::text(paragraph))
        });

    VNode::element("article")
        .with_class("sb-legal")
        .with_child(VNode::element("h1").with_child(VNode::text(page.title.as_str())))
        .with_children(paragraphs)
}
