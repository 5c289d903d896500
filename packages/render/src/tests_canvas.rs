use crate::{render_canvas, render_panel, to_html, CanvasState, HtmlOptions, VNode};
use serde_json::json;
use storeblocks_model::catalog;
use storeblocks_model::{BuilderElement, ColumnSlot, ElementKind, ElementType};

fn columns_with_child(column_index: usize) -> BuilderElement {
    let mut columns = catalog::instantiate(ElementType::Columns, "cols");
    let child = catalog::instantiate(ElementType::Text, "child").into_column("cols", column_index);
    if let Some(settings) = columns.columns_mut() {
        settings.children.push(child);
    }
    columns
}

fn cards(canvas: &VNode) -> Vec<&VNode> {
    canvas.find_by_class("sb-card")
}

#[test]
fn test_empty_page_shows_empty_state() {
    let canvas = render_canvas(&[], &CanvasState::default());

    assert!(canvas.has_class("sb-canvas--empty"));
    assert_eq!(canvas.find_by_class("sb-empty-state").len(), 1);
    assert!(canvas.text_content().contains("This page is empty"));
}

#[test]
fn test_one_card_per_element_with_affordances() {
    let elements = vec![
        catalog::instantiate(ElementType::Hero, "hero"),
        catalog::instantiate(ElementType::Text, "text"),
    ];
    let canvas = render_canvas(&elements, &CanvasState::default());

    let cards = cards(&canvas);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].attr("data-element-id"), Some("hero"));
    assert_eq!(cards[1].attr("data-index"), Some("1"));
    assert_eq!(cards[0].attr("draggable"), Some("true"));
    assert_eq!(canvas.find_by_class("sb-card__delete").len(), 2);
    assert_eq!(canvas.find_by_class("sb-card__handle").len(), 2);
}

#[test]
fn test_selected_card_is_marked() {
    let elements = vec![
        catalog::instantiate(ElementType::Hero, "hero"),
        catalog::instantiate(ElementType::Cta, "cta"),
    ];
    let state = CanvasState {
        selected: Some("cta"),
        ..CanvasState::default()
    };
    let canvas = render_canvas(&elements, &state);

    let selected = canvas.find_by_class("sb-card--selected");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].attr("data-element-id"), Some("cta"));
}

#[test]
fn test_preview_hides_affordances_and_selection() {
    let elements = vec![columns_with_child(0)];
    let slot = ColumnSlot {
        columns_id: "cols".to_string(),
        column_index: 0,
    };
    let state = CanvasState {
        selected: Some("cols"),
        preview: true,
        picker: Some(&slot),
    };
    let canvas = render_canvas(&elements, &state);

    assert!(canvas.find_by_class("sb-card--selected").is_empty());
    assert!(canvas.find_by_class("sb-card__toolbar").is_empty());
    assert!(canvas.find_by_class("sb-column-zone__add").is_empty());
    assert!(canvas.find_by_class("sb-picker").is_empty());
    assert_eq!(cards(&canvas)[0].attr("draggable"), None);
}

#[test]
fn test_columns_render_drop_zones_with_labels() {
    let elements = vec![columns_with_child(1)];
    let canvas = render_canvas(&elements, &CanvasState::default());

    let zones = canvas.find_by_class("sb-column-zone");
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[1].attr("data-column-index"), Some("1"));

    // Labels, not full previews
    assert!(zones[0].find_by_class("sb-column-child").is_empty());
    let chips = zones[1].find_by_class("sb-column-child");
    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].text_content(), "Text Block×");
    assert!(zones[1].find_by_class("sb-text").is_empty());

    let add = canvas.find_by_class("sb-column-zone__add");
    assert_eq!(add.len(), 2);
    assert_eq!(add[0].attr("data-action"), Some("open-column-picker"));
    assert_eq!(add[0].attr("data-columns-id"), Some("cols"));
}

#[test]
fn test_picker_lists_non_columns_types() {
    let elements = vec![columns_with_child(0)];
    let slot = ColumnSlot {
        columns_id: "cols".to_string(),
        column_index: 1,
    };
    let state = CanvasState {
        picker: Some(&slot),
        ..CanvasState::default()
    };
    let canvas = render_canvas(&elements, &state);

    let picker = canvas.find_by_class("sb-picker");
    assert_eq!(picker.len(), 1);
    assert_eq!(picker[0].attr("data-column-index"), Some("1"));

    let options = picker[0].find_by_class("sb-picker__option");
    assert_eq!(options.len(), ElementType::ALL.len() - 1);
    assert!(options
        .iter()
        .all(|option| option.attr("data-element-type") != Some("columns")));
}

#[test]
fn test_unknown_type_renders_placeholder() {
    let unknown = BuilderElement::new(
        "legacy",
        ElementKind::Unknown {
            type_tag: "carousel".to_string(),
            settings: json!({ "slides": 3 }),
        },
    );
    let canvas = render_canvas(&[unknown], &CanvasState::default());

    let placeholder = canvas.find_by_class("sb-unsupported");
    assert_eq!(placeholder.len(), 1);
    assert_eq!(
        placeholder[0].text_content(),
        "Unsupported element type: carousel"
    );
}

#[test]
fn test_malformed_settings_keep_their_card() {
    let elements: Vec<BuilderElement> = serde_json::from_value(json!([
        { "id": "grid", "type": "products", "settings": { "count": "" } },
        { "id": "hero", "type": "hero", "settings": { "title": 42 } },
        { "id": "text", "type": "text", "settings": { "fontSize": 16 } }
    ]))
    .unwrap();
    let canvas = render_canvas(&elements, &CanvasState::default());

    assert_eq!(cards(&canvas).len(), 3);
    assert!(canvas.find_by_class("sb-unsupported").is_empty());
    assert_eq!(canvas.find_by_class("sb-products").len(), 1);
    assert_eq!(canvas.find_by_class("sb-hero").len(), 1);
}

#[test]
fn test_each_type_renders_distinctly() {
    let expected = [
        (ElementType::Hero, "sb-hero"),
        (ElementType::Products, "sb-products"),
        (ElementType::Text, "sb-text"),
        (ElementType::Image, "sb-image"),
        (ElementType::Categories, "sb-categories"),
        (ElementType::Testimonials, "sb-testimonials"),
        (ElementType::Cta, "sb-cta"),
        (ElementType::CustomHtml, "sb-custom-html"),
        (ElementType::CustomCss, "sb-custom-css"),
        (ElementType::Columns, "sb-columns"),
    ];

    for (element_type, class) in expected {
        let element = catalog::instantiate(element_type, "e");
        let canvas = render_canvas(&[element], &CanvasState::default());
        assert_eq!(
            canvas.find_by_class(class).len(),
            1,
            "{} should render {}",
            element_type,
            class
        );
    }
}

#[test]
fn test_canvas_products_are_placeholders_capped_at_four() {
    let mut products = catalog::instantiate(ElementType::Products, "p");
    if let ElementKind::Products(settings) = &mut products.kind {
        settings.count = 9;
    }
    let canvas = render_canvas(&[products], &CanvasState::default());

    assert_eq!(canvas.find_by_class("sb-product-card--placeholder").len(), 4);
}

#[test]
fn test_text_font_bucket() {
    let mut text = catalog::instantiate(ElementType::Text, "t");
    if let ElementKind::Text(settings) = &mut text.kind {
        settings.font_size = storeblocks_model::FontSize::XLarge;
    }
    let canvas = render_canvas(&[text], &CanvasState::default());

    let block = canvas.find_by_class("sb-text");
    assert_eq!(block[0].style("font-size"), Some("24px"));
}

#[test]
fn test_custom_html_injected_and_css_shown_as_text() {
    let html = catalog::instantiate(ElementType::CustomHtml, "html");
    let css = catalog::instantiate(ElementType::CustomCss, "css");
    let canvas = render_canvas(&[html, css], &CanvasState::default());
    let markup = to_html(&[canvas], HtmlOptions::compact());

    assert!(markup.contains("<div>Your custom HTML here</div>"));
    assert!(markup.contains("<code>/* Add your custom CSS here */</code>"));
    assert!(!markup.contains("<style"));
}

#[test]
fn test_panel_empty_state() {
    let panel = render_panel(None);
    assert!(panel.has_class("sb-panel--empty"));
}

#[test]
fn test_panel_fields_follow_schema() {
    let hero = catalog::instantiate(ElementType::Hero, "hero");
    let panel = render_panel(Some(&hero));

    let fields = panel.find_by_class("sb-field");
    assert_eq!(fields.len(), catalog::schema(ElementType::Hero).len());

    let inputs: Vec<&VNode> = panel
        .descendants()
        .into_iter()
        .filter(|node| node.attr("data-field") == Some("title"))
        .collect();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].attr("value"), Some("Welcome to Our Store"));
}

#[test]
fn test_panel_color_has_picker_and_hex_input() {
    let cta = catalog::instantiate(ElementType::Cta, "cta");
    let panel = render_panel(Some(&cta));

    let bound: Vec<&VNode> = panel
        .descendants()
        .into_iter()
        .filter(|node| node.attr("data-field") == Some("backgroundColor"))
        .collect();

    assert_eq!(bound.len(), 2);
    assert_eq!(bound[0].attr("type"), Some("color"));
    assert_eq!(bound[1].attr("type"), Some("text"));
    assert_eq!(bound[0].attr("value"), bound[1].attr("value"));
}
