use super::{empty_message, grid, heading, wrap_link};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::product::categories;
use storeblocks_model::CategoriesSettings;

const DEMO_CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Home & Garden", "Sports"];

pub(super) fn render(settings: &CategoriesSettings, ctx: &RenderContext) -> VNode {
    let section = VNode::element("section")
        .with_class("sb-categories")
        .with_children(heading("h2", "sb-section-title", &settings.title));

    let names: Vec<&str> = if ctx.is_view() {
        categories(ctx.products)
            .into_iter()
            .take(settings.count as usize)
            .collect()
    } else {
        DEMO_CATEGORIES
            .into_iter()
            .take(settings.count as usize)
            .collect()
    };

    if names.is_empty() {
        if ctx.is_view() {
            return section.with_child(empty_message("No categories available"));
        }
        return section;
    }

    let columns = (names.len() as u32).min(4);
    let tiles = names.into_iter().map(|name| tile(name, ctx));
    section.with_child(grid(columns).with_children(tiles))
}

fn tile(name: &str, ctx: &RenderContext) -> VNode {
    let label = VNode::element("span")
        .with_class("sb-category-tile__name")
        .with_child(VNode::text(name));

    VNode::element("div")
        .with_class("sb-category-tile")
        .with_child(wrap_link(
            ctx,
            &format!("/products?category={}", encode_query(name)),
            label,
        ))
}

/// Percent-encode a query value
fn encode_query(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
