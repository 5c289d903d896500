//! Render dispatch.
//!
//! One table maps each element kind to its block renderer. Both the canvas
//! and the storefront draw through [`render_block`]; the block decides what
//! differs between [`RenderMode::Edit`](crate::RenderMode::Edit) and
//! [`RenderMode::View`](crate::RenderMode::View).

mod categories;
mod columns;
mod cta;
mod custom;
mod hero;
mod image;
mod products;
mod testimonials;
mod text;

use crate::context::RenderContext;
use crate::navigation::is_external;
use crate::vdom::VNode;
use storeblocks_model::catalog;
use storeblocks_model::{BuilderElement, ElementKind};
use tracing::debug;

/// Render one element. `None` means the element has no output in this mode.
pub fn render_block(element: &BuilderElement, ctx: &RenderContext) -> Option<VNode> {
    let node = match &element.kind {
        ElementKind::Hero(settings) => hero::render(settings, ctx),
        ElementKind::Products(settings) => products::render(settings, ctx),
        ElementKind::Text(settings) => text::render(settings),
        ElementKind::Image(settings) => image::render(settings, ctx),
        ElementKind::Categories(settings) => categories::render(settings, ctx),
        ElementKind::Testimonials(settings) => testimonials::render(settings, ctx),
        ElementKind::Cta(settings) => cta::render(settings, ctx),
        ElementKind::CustomHtml(settings) => custom::render_html(settings),
        ElementKind::CustomCss(settings) => custom::render_css(settings, ctx),
        ElementKind::Columns(settings) => columns::render(&element.id, settings, ctx),
        ElementKind::Unknown { type_tag, .. } => return unsupported(type_tag, ctx),
    };

    Some(node.with_key(element.id.clone()))
}

/// Human label for an element, falling back to its raw type tag
pub fn element_label(element: &BuilderElement) -> String {
    match element.element_type() {
        Some(element_type) => catalog::label(element_type).to_string(),
        None => element.type_tag().to_string(),
    }
}

fn unsupported(type_tag: &str, ctx: &RenderContext) -> Option<VNode> {
    if ctx.is_view() {
        debug!(type_tag, "Skipping unsupported element type");
        return None;
    }

    Some(
        VNode::element("div")
            .with_class("sb-unsupported")
            .with_attr("role", "note")
            .with_child(VNode::text(format!("Unsupported element type: {}", type_tag))),
    )
}

/// Button or link target. On the storefront the path is routed through the
/// navigator; on the canvas it is inert.
fn link(ctx: &RenderContext, path: &str, label: &str, class: &str) -> VNode {
    if !ctx.is_view() {
        return VNode::element("span")
            .with_class(class)
            .with_attr("data-href", path)
            .with_child(VNode::text(label));
    }

    let anchor = VNode::element("a")
        .with_class(class)
        .with_attr("href", ctx.navigator.resolve(path));

    let anchor = if is_external(path) {
        anchor.with_attr("rel", "noopener")
    } else {
        anchor.with_attr("data-navigate", path)
    };

    anchor.with_child(VNode::text(label))
}

/// Wrap a node in a navigating anchor on the storefront
fn wrap_link(ctx: &RenderContext, path: &str, node: VNode) -> VNode {
    if !ctx.is_view() || path.trim().is_empty() {
        return node;
    }

    let anchor = VNode::element("a").with_attr("href", ctx.navigator.resolve(path));
    let anchor = if is_external(path) {
        anchor.with_attr("rel", "noopener")
    } else {
        anchor.with_attr("data-navigate", path)
    };
    anchor.with_child(node)
}

fn heading(tag: &str, class: &str, content: &str) -> Option<VNode> {
    if content.trim().is_empty() {
        return None;
    }
    Some(
        VNode::element(tag)
            .with_class(class)
            .with_child(VNode::text(content)),
    )
}

fn grid(columns: u32) -> VNode {
    VNode::element("div")
        .with_class("sb-grid")
        .with_style("display", "grid")
        .with_style("gap", "16px")
        .with_style(
            "grid-template-columns",
            format!("repeat({}, minmax(0, 1fr))", columns.max(1)),
        )
}

fn empty_message(message: &str) -> VNode {
    VNode::element("p")
        .with_class("sb-empty")
        .with_child(VNode::text(message))
}
