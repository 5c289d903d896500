use super::{element_label, render_block};
use crate::context::RenderContext;
use crate::vdom::VNode;
use storeblocks_model::ColumnsSettings;

pub(super) fn render(columns_id: &str, settings: &ColumnsSettings, ctx: &RenderContext) -> VNode {
    let count = settings.column_count.max(1);

    let container = VNode::element("div")
        .with_class("sb-columns")
        .with_style("display", "grid")
        .with_style("gap", format!("{}px", settings.gap))
        .with_style(
            "grid-template-columns",
            format!("repeat({}, minmax(0, 1fr))", count),
        );

    let slots = (0..count as usize).map(|column_index| {
        if ctx.is_view() {
            view_column(settings, column_index, ctx)
        } else {
            drop_zone(columns_id, settings, column_index, ctx)
        }
    });

    container.with_children(slots)
}

fn view_column(settings: &ColumnsSettings, column_index: usize, ctx: &RenderContext) -> VNode {
    let children = settings
        .column(column_index)
        .filter_map(|child| render_block(child, ctx));

    VNode::element("div")
        .with_class("sb-column")
        .with_children(children)
}

/// Canvas slot: type labels of its children plus the "+" picker trigger
fn drop_zone(
    columns_id: &str,
    settings: &ColumnsSettings,
    column_index: usize,
    ctx: &RenderContext,
) -> VNode {
    let mut zone = VNode::element("div")
        .with_class("sb-column-zone")
        .with_attr("data-columns-id", columns_id)
        .with_attr("data-column-index", column_index.to_string());

    let mut empty = true;
    for child in settings.column(column_index) {
        empty = false;

        let mut chip = VNode::element("div")
            .with_class("sb-column-child")
            .with_key(child.id.clone())
            .with_attr("data-element-id", child.id.as_str())
            .with_attr("data-element-type", child.type_tag())
            .with_child(
                VNode::element("span")
                    .with_class("sb-column-child__label")
                    .with_child(VNode::text(element_label(child))),
            );

        if ctx.is_selected(&child.id) {
            chip = chip
                .with_class("sb-column-child--selected")
                .with_attr("data-selected", "true");
        }

        if ctx.editable() {
            chip = chip.with_attr("data-action", "select").with_child(
                VNode::element("button")
                    .with_class("sb-column-child__remove")
                    .with_attr("type", "button")
                    .with_attr("data-action", "remove")
                    .with_attr("data-element-id", child.id.as_str())
                    .with_attr("aria-label", "Remove")
                    .with_child(VNode::text("×")),
            );
        }

        zone = zone.with_child(chip);
    }

    if empty {
        zone = zone.with_child(
            VNode::element("p")
                .with_class("sb-column-zone__empty")
                .with_child(VNode::text(format!("Column {}", column_index + 1))),
        );
    }

    if ctx.editable() {
        zone = zone.with_child(
            VNode::element("button")
                .with_class("sb-column-zone__add")
                .with_attr("type", "button")
                .with_attr("data-action", "open-column-picker")
                .with_attr("data-columns-id", columns_id)
                .with_attr("data-column-index", column_index.to_string())
                .with_attr("aria-label", "Add element to column")
                .with_child(VNode::text("+")),
        );
    }

    zone
}
