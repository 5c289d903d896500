use super::{grid, heading};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::{Testimonial, TestimonialsSettings};

pub(super) fn render(settings: &TestimonialsSettings, ctx: &RenderContext) -> VNode {
    let section = VNode::element("section")
        .with_class("sb-testimonials")
        .with_children(heading("h2", "sb-section-title", &settings.title));

    if settings.testimonials.is_empty() {
        if ctx.is_view() {
            return section;
        }
        return section.with_child(
            VNode::element("p")
                .with_class("sb-empty")
                .with_child(VNode::text("No testimonials yet")),
        );
    }

    let columns = (settings.testimonials.len() as u32).min(3);
    let cards = settings.testimonials.iter().map(card);
    section.with_child(grid(columns).with_children(cards))
}

fn card(testimonial: &Testimonial) -> VNode {
    let mut cite = VNode::element("footer")
        .with_class("sb-testimonial__author")
        .with_child(
            VNode::element("cite").with_child(VNode::text(testimonial.name.as_str())),
        );

    if !testimonial.role.trim().is_empty() {
        cite = cite.with_child(
            VNode::element("span")
                .with_class("sb-testimonial__role")
                .with_child(VNode::text(testimonial.role.as_str())),
        );
    }

    VNode::element("blockquote")
        .with_class("sb-testimonial")
        .with_child(VNode::element("p").with_child(VNode::text(testimonial.quote.as_str())))
        .with_child(cite)
}
