//! # Properties Panel
//!
//! Input fields for the selected element, one per entry in the catalog
//! schema of its type. Every input carries `data-field` with the settings
//! key it edits; the host feeds field changes back to the editor.
//!
//! Colors get two inputs bound to the same key: a color picker and a hex
//! text box. Both read the stored value, so an edit through either one is
//! reflected by the other on the next render.

use crate::blocks::element_label;
use crate::vdom::VNode;
use serde_json::Value;
use storeblocks_model::catalog;
use storeblocks_model::{normalize_hex, BuilderElement, FieldKind, FieldSpec};

pub fn render_panel(selected: Option<&BuilderElement>) -> VNode {
    let panel = VNode::element("aside").with_class("sb-panel");

    let Some(element) = selected else {
        return panel.with_class("sb-panel--empty").with_child(
            VNode::element("p")
                .with_class("sb-panel__hint")
                .with_child(VNode::text("Select an element to edit its properties")),
        );
    };

    let panel = panel
        .with_attr("data-element-id", element.id.as_str())
        .with_child(
            VNode::element("h3")
                .with_class("sb-panel__title")
                .with_child(VNode::text(element_label(element))),
        );

    let Some(element_type) = element.element_type() else {
        return panel.with_child(
            VNode::element("p")
                .with_class("sb-panel__hint")
                .with_child(VNode::text("This element type has no editable properties")),
        );
    };

    let settings = element.kind.settings_value();
    let fields = catalog::schema(element_type)
        .iter()
        .map(|spec| field(spec, settings.get(spec.key)));

    panel.with_children(fields)
}

fn field(spec: &FieldSpec, value: Option<&Value>) -> VNode {
    let value = value.map(display_value).unwrap_or_default();
    let id = format!("sb-field-{}", spec.key);

    let label = VNode::element("label")
        .with_attr("for", id.as_str())
        .with_child(VNode::text(spec.label));

    VNode::element("div")
        .with_class("sb-field")
        .with_attr("data-field-kind", kind_name(&spec.kind))
        .with_child(label)
        .with_child(input(spec, &id, &value))
}

fn input(spec: &FieldSpec, id: &str, value: &str) -> VNode {
    match spec.kind {
        FieldKind::Text | FieldKind::Url => VNode::element("input")
            .with_attr("id", id)
            .with_attr("type", if spec.kind == FieldKind::Url { "url" } else { "text" })
            .with_attr("data-field", spec.key)
            .with_attr("value", value),

        FieldKind::TextArea | FieldKind::Code => {
            let area = VNode::element("textarea")
                .with_attr("id", id)
                .with_attr("data-field", spec.key)
                .with_child(VNode::text(value));

            if spec.kind == FieldKind::Code {
                area.with_class("sb-code").with_attr("spellcheck", "false")
            } else {
                area.with_attr("rows", "3")
            }
        }

        FieldKind::Number { min, max, step } => VNode::element("input")
            .with_attr("id", id)
            .with_attr("type", "number")
            .with_attr("data-field", spec.key)
            .with_attr("min", min.to_string())
            .with_attr("max", max.to_string())
            .with_attr("step", step.to_string())
            .with_attr("value", value),

        FieldKind::Color => {
            let swatch = normalize_hex(value).unwrap_or_else(|| "#000000".to_string());
            VNode::element("div")
                .with_class("sb-color")
                .with_child(
                    VNode::element("input")
                        .with_attr("type", "color")
                        .with_attr("data-field", spec.key)
                        .with_attr("value", swatch),
                )
                .with_child(
                    VNode::element("input")
                        .with_attr("id", id)
                        .with_attr("type", "text")
                        .with_attr("data-field", spec.key)
                        .with_attr("value", value)
                        .with_attr("placeholder", "#000000"),
                )
        }

        FieldKind::Toggle => {
            let checkbox = VNode::element("input")
                .with_attr("id", id)
                .with_attr("type", "checkbox")
                .with_attr("data-field", spec.key);
            if value == "true" {
                checkbox.with_attr("checked", "checked")
            } else {
                checkbox
            }
        }

        FieldKind::Select(options) => {
            let options = options.iter().map(|option| {
                let node = VNode::element("option")
                    .with_attr("value", *option)
                    .with_child(VNode::text(*option));
                if *option == value {
                    node.with_attr("selected", "selected")
                } else {
                    node
                }
            });

            VNode::element("select")
                .with_attr("id", id)
                .with_attr("data-field", spec.key)
                .with_children(options)
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::TextArea => "textarea",
        FieldKind::Url => "url",
        FieldKind::Number { .. } => "number",
        FieldKind::Color => "color",
        FieldKind::Toggle => "toggle",
        FieldKind::Select(_) => "select",
        FieldKind::Code => "code",
    }
}
