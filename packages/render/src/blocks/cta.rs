use super::{heading, link};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::CtaSettings;

pub(super) fn render(settings: &CtaSettings, ctx: &RenderContext) -> VNode {
    let mut section = VNode::element("section")
        .with_class("sb-cta")
        .with_style("background-color", settings.background_color.as_str())
        .with_style("color", settings.text_color.as_str())
        .with_style("text-align", "center")
        .with_children(heading("h2", "sb-cta__title", &settings.title))
        .with_children(heading("p", "sb-cta__subtitle", &settings.subtitle));

    if !settings.button_text.trim().is_empty() {
        section = section.with_child(link(
            ctx,
            &settings.button_link,
            &settings.button_text,
            "sb-button",
        ));
    }

    section
}
