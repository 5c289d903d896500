use crate::vdom::VNode;
use storeblocks_model::TextSettings;

pub(super) fn render(settings: &TextSettings) -> VNode {
    VNode::element("div")
        .with_class("sb-text")
        .with_attr("data-font-size", settings.font_size.as_str())
        .with_style("font-size", format!("{}px", settings.font_size.pixels()))
        .with_style("text-align", settings.alignment.as_str())
        .with_style("color", settings.color.as_str())
        .with_style("white-space", "pre-wrap")
        .with_child(VNode::text(settings.content.as_str()))
}
