use super::{heading, link};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::HeroSettings;

pub(super) fn render(settings: &HeroSettings, ctx: &RenderContext) -> VNode {
    let mut section = VNode::element("section")
        .with_class("sb-hero")
        .with_style("position", "relative")
        .with_style("min-height", format!("{}px", settings.height))
        .with_style("background-color", settings.background_color.as_str())
        .with_style("color", settings.text_color.as_str());

    if !settings.background_image.trim().is_empty() {
        section = section
            .with_style(
                "background-image",
                format!("url('{}')", settings.background_image.replace('\'', "%27")),
            )
            .with_style("background-size", "cover")
            .with_style("background-position", "center");
    }

    let overlay = VNode::element("div")
        .with_class("sb-hero__overlay")
        .with_style("position", "absolute")
        .with_style("inset", "0")
        .with_style(
            "background-color",
            format!("rgba(0, 0, 0, {})", settings.overlay_opacity.clamp(0.0, 1.0)),
        );

    let mut content = VNode::element("div")
        .with_class("sb-hero__content")
        .with_style("position", "relative")
        .with_style("text-align", "center")
        .with_children(heading("h1", "sb-hero__title", &settings.title))
        .with_children(heading("p", "sb-hero__subtitle", &settings.subtitle));

    if !settings.button_text.trim().is_empty() {
        content = content.with_child(link(ctx, &settings.button_link, &settings.button_text, "sb-button"));
    }

    section.with_child(overlay).with_child(content)
}
