use super::wrap_link;
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::ImageSettings;

pub(super) fn render(settings: &ImageSettings, ctx: &RenderContext) -> VNode {
    let figure = VNode::element("figure").with_class("sb-image");

    if settings.src.trim().is_empty() {
        if ctx.is_view() {
            return figure;
        }
        return figure.with_child(
            VNode::element("div")
                .with_class("sb-image__placeholder")
                .with_child(VNode::text("No image selected")),
        );
    }

    let img = VNode::element("img")
        .with_attr("src", settings.src.as_str())
        .with_attr("alt", settings.alt.as_str())
        .with_style("width", dimension(&settings.width))
        .with_style("height", dimension(&settings.height));

    figure.with_child(wrap_link(ctx, &settings.link, img))
}

/// Bare numbers are pixels; anything else is passed through as CSS
fn dimension(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "auto".to_string()
    } else if value.parse::<f64>().is_ok() {
        format!("{}px", value)
    } else {
        value.to_string()
    }
}
