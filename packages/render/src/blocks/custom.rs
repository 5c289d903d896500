use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::{CustomCssSettings, CustomHtmlSettings};

/// Owner-supplied markup, injected as is in both modes
pub(super) fn render_html(settings: &CustomHtmlSettings) -> VNode {
    VNode::element("div")
        .with_class("sb-custom-html")
        .with_child(VNode::raw(settings.html.as_str()))
}

/// Break up any `</style` so the sheet cannot close its own element.
/// HTML matches the tag name case-insensitively, so this does too.
fn escape_style_close(css: &str) -> String {
    const CLOSE: &str = "</style";

    let lowered = css.to_ascii_lowercase();
    let mut out = String::with_capacity(css.len());
    let mut last = 0;
    for (start, _) in lowered.match_indices(CLOSE) {
        out.push_str(&css[last..start]);
        out.push_str("<\\/");
        out.push_str(&css[start + 2..start + CLOSE.len()]);
        last = start + CLOSE.len();
    }
    out.push_str(&css[last..]);
    out
}

/// Shown as text on the canvas, applied as a stylesheet on the storefront
pub(super) fn render_css(settings: &CustomCssSettings, ctx: &RenderContext) -> VNode {
    if ctx.is_view() {
        return VNode::element("style")
            .with_attr("data-source", "custom-css")
            .with_child(VNode::raw(escape_style_close(&settings.css)));
    }

    VNode::element("div")
        .with_class("sb-custom-css")
        .with_child(
            VNode::element("span")
                .with_class("sb-custom-css__label")
                .with_child(VNode::text("Custom CSS")),
        )
        .with_child(
            VNode::element("pre")
                .with_child(VNode::element("code").with_child(VNode::text(settings.css.as_str()))),
        )
}
