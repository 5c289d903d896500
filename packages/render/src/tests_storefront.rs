use crate::{render_legal, render_page, render_storefront, to_html, HtmlOptions, RenderContext, StoreNavigator, VNode};
use serde_json::json;
use storeblocks_model::catalog;
use storeblocks_model::{
    BuilderElement, ElementKind, ElementType, LegalPage, Product, SettingsMap,
};

fn products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            id: format!("p{}", i),
            name: format!("Product {}", i),
            price: 10.0 + i as f64,
            image: String::new(),
            slug: format!("product-{}", i),
            category: if i % 2 == 0 { "Shoes" } else { "Hats" }.to_string(),
        })
        .collect()
}

fn with_settings(element_type: ElementType, id: &str, patch: serde_json::Value) -> BuilderElement {
    let element = catalog::instantiate(element_type, id);
    let patch: SettingsMap = serde_json::from_value(patch).unwrap();
    BuilderElement::new(id, element.kind.merged(&patch).unwrap())
}

fn render(elements: &[BuilderElement], products: &[Product]) -> Vec<VNode> {
    let nav = StoreNavigator::new("/store", "shop");
    let ctx = RenderContext::view("shop", products, &nav);
    render_storefront(elements, &ctx)
}

fn all<'a>(nodes: &'a [VNode], class: &str) -> Vec<&'a VNode> {
    nodes.iter().flat_map(|node| node.find_by_class(class)).collect()
}

#[test]
fn test_empty_page_renders_nothing() {
    assert!(render(&[], &products(3)).is_empty());
}

#[test]
fn test_products_sliced_to_count() {
    let grid = with_settings(ElementType::Products, "grid", json!({ "count": 4 }));
    let nodes = render(&[grid], &products(10));

    let cards = all(&nodes, "sb-product-card");
    assert_eq!(cards.len(), 4);

    let ids: Vec<&str> = cards
        .iter()
        .filter_map(|card| card.attr("data-product-id"))
        .collect();
    assert_eq!(ids, vec!["p0", "p1", "p2", "p3"]);
}

#[test]
fn test_products_count_as_string_is_accepted() {
    let grid = with_settings(ElementType::Products, "grid", json!({ "count": "2" }));
    let nodes = render(&[grid], &products(10));

    assert_eq!(all(&nodes, "sb-product-card").len(), 2);
}

#[test]
fn test_no_products_message() {
    let grid = catalog::instantiate(ElementType::Products, "grid");
    let nodes = render(&[grid], &[]);

    assert_eq!(all(&nodes, "sb-product-card").len(), 0);
    assert!(nodes[0].text_content().contains("No products available"));
}

#[test]
fn test_prices_follow_show_price() {
    let shown = render(&[catalog::instantiate(ElementType::Products, "a")], &products(1));
    assert_eq!(all(&shown, "sb-product-card__price")[0].text_content(), "$10.00");

    let hidden = with_settings(ElementType::Products, "b", json!({ "showPrice": false }));
    let hidden = render(&[hidden], &products(1));
    assert!(all(&hidden, "sb-product-card__price").is_empty());
}

#[test]
fn test_buttons_route_through_navigator() {
    let hero = catalog::instantiate(ElementType::Hero, "hero");
    let nodes = render(&[hero], &[]);

    let button = all(&nodes, "sb-button");
    assert_eq!(button.len(), 1);
    assert_eq!(button[0].tag(), Some("a"));
    assert_eq!(button[0].attr("href"), Some("/store/shop/products"));
    assert_eq!(button[0].attr("data-navigate"), Some("/products"));
}

#[test]
fn test_external_links_are_not_scoped() {
    let cta = with_settings(
        ElementType::Cta,
        "cta",
        json!({ "buttonLink": "https://example.com/sale" }),
    );
    let nodes = render(&[cta], &[]);

    let button = all(&nodes, "sb-button");
    assert_eq!(button[0].attr("href"), Some("https://example.com/sale"));
    assert_eq!(button[0].attr("data-navigate"), None);
}

#[test]
fn test_padded_external_link_is_not_navigated() {
    let cta = with_settings(
        ElementType::Cta,
        "cta",
        json!({ "buttonLink": " https://example.com/sale" }),
    );
    let nodes = render(&[cta], &[]);

    let button = all(&nodes, "sb-button");
    assert_eq!(button[0].attr("href"), Some("https://example.com/sale"));
    assert_eq!(button[0].attr("rel"), Some("noopener"));
    assert_eq!(button[0].attr("data-navigate"), None);
}

#[test]
fn test_malformed_settings_still_render() {
    let elements: Vec<BuilderElement> = serde_json::from_value(json!([
        { "id": "grid", "type": "products", "settings": { "count": "" } },
        { "id": "hero", "type": "hero", "settings": { "title": 42 } },
        { "id": "text", "type": "text", "settings": { "fontSize": 16 } }
    ]))
    .unwrap();

    let nodes = render(&elements, &products(10));
    assert_eq!(nodes.len(), 3);
    assert!(nodes[0].has_class("sb-products"));
    assert!(nodes[1].has_class("sb-hero"));
    assert!(nodes[2].has_class("sb-text"));
    assert_eq!(all(&nodes, "sb-product-card").len(), 4);
}

#[test]
fn test_unknown_types_are_skipped() {
    let unknown = BuilderElement::new(
        "legacy",
        ElementKind::Unknown {
            type_tag: "carousel".to_string(),
            settings: json!({}),
        },
    );
    let text = catalog::instantiate(ElementType::Text, "text");

    let nodes = render(&[unknown, text], &[]);
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].has_class("sb-text"));
}

#[test]
fn test_every_catalog_type_renders_in_view_mode() {
    for element_type in ElementType::ALL {
        let element = catalog::instantiate(element_type, "e");
        let nodes = render(&[element], &products(2));
        assert_eq!(nodes.len(), 1, "{} should render on the storefront", element_type);
    }
}

#[test]
fn test_categories_come_from_products() {
    let categories = catalog::instantiate(ElementType::Categories, "cats");
    let nodes = render(&[categories], &products(5));

    let tiles = all(&nodes, "sb-category-tile");
    let names: Vec<String> = tiles.iter().map(|tile| tile.text_content()).collect();
    assert_eq!(names, vec!["Shoes", "Hats"]);

    let link = tiles[0].children()[0].attr("href");
    assert_eq!(link, Some("/store/shop/products?category=Shoes"));
}

#[test]
fn test_columns_render_children_per_slot() {
    let mut columns = catalog::instantiate(ElementType::Columns, "cols");
    if let Some(settings) = columns.columns_mut() {
        settings
            .children
            .push(catalog::instantiate(ElementType::Text, "left").into_column("cols", 0));
        settings
            .children
            .push(catalog::instantiate(ElementType::Image, "right").into_column("cols", 1));
    }

    let nodes = render(&[columns], &[]);
    let slots = all(&nodes, "sb-column");
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].find_by_class("sb-text").len(), 1);
    assert_eq!(slots[1].find_by_class("sb-image").len(), 1);
    assert!(all(&nodes, "sb-column-zone").is_empty());
}

#[test]
fn test_custom_css_becomes_stylesheet() {
    let css = with_settings(
        ElementType::CustomCss,
        "css",
        json!({ "css": "body { color: red }" }),
    );
    let markup = to_html(&render(&[css], &[]), HtmlOptions::compact());

    assert!(markup.starts_with("<style"));
    assert!(markup.contains("body { color: red }"));
}

#[test]
fn test_page_wrapper_and_legal() {
    let nav = StoreNavigator::new("/store", "shop");
    let ctx = RenderContext::view("shop", &[], &nav);
    let page = render_page(&[], &ctx);
    assert_eq!(page.tag(), Some("main"));
    assert!(page.children().is_empty());

    let legal = render_legal(&LegalPage {
        title: "Terms of Service".to_string(),
        content: "First.\n\nSecond.".to_string(),
    });
    assert_eq!(legal.children().len(), 3);
}
