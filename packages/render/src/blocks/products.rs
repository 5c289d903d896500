use super::{empty_message, grid, heading, wrap_link};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::{Product, ProductsSettings};

/// Canvas tiles never exceed one row
const MAX_PLACEHOLDERS: u32 = 4;

pub(super) fn render(settings: &ProductsSettings, ctx: &RenderContext) -> VNode {
    let section = VNode::element("section")
        .with_class("sb-products")
        .with_children(heading("h2", "sb-section-title", &settings.title));

    if !ctx.is_view() {
        let tiles = settings.count.min(MAX_PLACEHOLDERS);
        let placeholders = (0..tiles).map(|i| placeholder(i, settings.show_price));
        return section.with_child(grid(tiles.max(1)).with_children(placeholders));
    }

    let products: Vec<&Product> = ctx.products.iter().take(settings.count as usize).collect();
    if products.is_empty() {
        return section.with_child(empty_message("No products available"));
    }

    let cards = products
        .into_iter()
        .map(|product| card(product, settings.show_price, ctx));
    section.with_child(grid(settings.columns).with_children(cards))
}

fn placeholder(index: u32, show_price: bool) -> VNode {
    let mut tile = VNode::element("div")
        .with_class("sb-product-card")
        .with_class("sb-product-card--placeholder")
        .with_child(VNode::element("div").with_class("sb-product-card__image"))
        .with_child(
            VNode::element("h3")
                .with_class("sb-product-card__name")
                .with_child(VNode::text(format!("Product {}", index + 1))),
        );

    if show_price {
        tile = tile.with_child(
            VNode::element("p")
                .with_class("sb-product-card__price")
                .with_child(VNode::text("$0.00")),
        );
    }
    tile
}

fn card(product: &Product, show_price: bool, ctx: &RenderContext) -> VNode {
    let mut body = VNode::element("div").with_class("sb-product-card__body");

    if !product.image.trim().is_empty() {
        body = body.with_child(
            VNode::element("img")
                .with_class("sb-product-card__image")
                .with_attr("src", product.image.as_str())
                .with_attr("alt", product.name.as_str()),
        );
    }

    body = body.with_child(
        VNode::element("h3")
            .with_class("sb-product-card__name")
            .with_child(VNode::text(product.name.as_str())),
    );

    if show_price {
        body = body.with_child(
            VNode::element("p")
                .with_class("sb-product-card__price")
                .with_child(VNode::text(product.display_price())),
        );
    }

    VNode::element("article")
        .with_class("sb-product-card")
        .with_attr("data-product-id", product.id.as_str())
        .with_child(wrap_link(ctx, &product.path(), body))
}
