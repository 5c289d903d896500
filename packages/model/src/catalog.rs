//! # Element Catalog
//!
//! Static registry of every [`ElementType`]: its default settings template,
//! its display label, and the property schema the properties panel renders.
//!
//! Adding a type means adding a template here, a schema entry here, and a
//! render branch in the block dispatcher.

use crate::element::{BuilderElement, ElementKind, ElementType};
use crate::settings::*;
use crate::SettingsMap;

/// Default settings for a type
pub fn template(element_type: ElementType) -> ElementKind {
    match element_type {
        ElementType::Hero => ElementKind::Hero(HeroSettings::default()),
        ElementType::Products => ElementKind::Products(ProductsSettings::default()),
        ElementType::Text => ElementKind::Text(TextSettings::default()),
        ElementType::Image => ElementKind::Image(ImageSettings::default()),
        ElementType::Categories => ElementKind::Categories(CategoriesSettings::default()),
        ElementType::Testimonials => ElementKind::Testimonials(TestimonialsSettings::default()),
        ElementType::Cta => ElementKind::Cta(CtaSettings::default()),
        ElementType::CustomHtml => ElementKind::CustomHtml(CustomHtmlSettings::default()),
        ElementType::CustomCss => ElementKind::CustomCss(CustomCssSettings::default()),
        ElementType::Columns => ElementKind::Columns(ColumnsSettings::default()),
    }
}

/// New element from the type's template
pub fn instantiate(element_type: ElementType, id: impl Into<String>) -> BuilderElement {
    BuilderElement::new(id, template(element_type))
}

/// Human-readable name shown on cards, column slots and the type picker
pub fn label(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Hero => "Hero Banner",
        ElementType::Products => "Product Grid",
        ElementType::Text => "Text Block",
        ElementType::Image => "Image",
        ElementType::Categories => "Categories",
        ElementType::Testimonials => "Testimonials",
        ElementType::Cta => "Call to Action",
        ElementType::CustomHtml => "Custom HTML",
        ElementType::CustomCss => "Custom CSS",
        ElementType::Columns => "Columns",
    }
}

/// Input widget for one setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Url,
    Number { min: f64, max: f64, step: f64 },
    Color,
    Toggle,
    Select(&'static [&'static str]),
    /// Monospace editor for raw HTML or CSS
    Code,
}

/// One editable setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

const fn number(min: f64, max: f64, step: f64) -> FieldKind {
    FieldKind::Number { min, max, step }
}

const HERO_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("subtitle", "Subtitle", FieldKind::TextArea),
    field("buttonText", "Button Text", FieldKind::Text),
    field("buttonLink", "Button Link", FieldKind::Url),
    field("backgroundImage", "Background Image", FieldKind::Url),
    field("backgroundColor", "Background Color", FieldKind::Color),
    field("textColor", "Text Color", FieldKind::Color),
    field("overlayOpacity", "Overlay Opacity", number(0.0, 1.0, 0.1)),
    field("height", "Height (px)", number(200.0, 1000.0, 10.0)),
];

const PRODUCTS_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("count", "Products to Show", number(1.0, 24.0, 1.0)),
    field("columns", "Columns", number(1.0, 6.0, 1.0)),
    field("showPrice", "Show Price", FieldKind::Toggle),
];

const TEXT_FIELDS: &[FieldSpec] = &[
    field("content", "Content", FieldKind::TextArea),
    field("fontSize", "Font Size", FieldKind::Select(&FontSize::OPTIONS)),
    field("alignment", "Alignment", FieldKind::Select(&Alignment::OPTIONS)),
    field("color", "Text Color", FieldKind::Color),
];

const IMAGE_FIELDS: &[FieldSpec] = &[
    field("src", "Image URL", FieldKind::Url),
    field("alt", "Alt Text", FieldKind::Text),
    field("width", "Width", FieldKind::Text),
    field("height", "Height", FieldKind::Text),
    field("link", "Link", FieldKind::Url),
];

const CATEGORIES_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("count", "Categories to Show", number(1.0, 12.0, 1.0)),
];

const TESTIMONIALS_FIELDS: &[FieldSpec] = &[field("title", "Title", FieldKind::Text)];

const CTA_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("subtitle", "Subtitle", FieldKind::TextArea),
    field("buttonText", "Button Text", FieldKind::Text),
    field("buttonLink", "Button Link", FieldKind::Url),
    field("backgroundColor", "Background Color", FieldKind::Color),
    field("textColor", "Text Color", FieldKind::Color),
];

const CUSTOM_HTML_FIELDS: &[FieldSpec] = &[field("html", "HTML", FieldKind::Code)];

const CUSTOM_CSS_FIELDS: &[FieldSpec] = &[field("css", "CSS", FieldKind::Code)];

pub const MAX_COLUMNS: u32 = 4;

const COLUMNS_FIELDS: &[FieldSpec] = &[
    field("columnCount", "Number of Columns", number(1.0, MAX_COLUMNS as f64, 1.0)),
    field("gap", "Gap (px)", number(0.0, 100.0, 1.0)),
];

/// Property schema for a type
pub fn schema(element_type: ElementType) -> &'static [FieldSpec] {
    match element_type {
        ElementType::Hero => HERO_FIELDS,
        ElementType::Products => PRODUCTS_FIELDS,
        ElementType::Text => TEXT_FIELDS,
        ElementType::Image => IMAGE_FIELDS,
        ElementType::Categories => CATEGORIES_FIELDS,
        ElementType::Testimonials => TESTIMONIALS_FIELDS,
        ElementType::Cta => CTA_FIELDS,
        ElementType::CustomHtml => CUSTOM_HTML_FIELDS,
        ElementType::CustomCss => CUSTOM_CSS_FIELDS,
        ElementType::Columns => COLUMNS_FIELDS,
    }
}

pub fn field_spec(element_type: ElementType, key: &str) -> Option<&'static FieldSpec> {
    schema(element_type).iter().find(|spec| spec.key == key)
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            title: "Welcome to Our Store".to_string(),
            subtitle: "Discover amazing products at great prices".to_string(),
            button_text: "Shop Now".to_string(),
            button_link: "/products".to_string(),
            background_image: String::new(),
            background_color: "#1f2937".to_string(),
            text_color: "#ffffff".to_string(),
            overlay_opacity: 0.4,
            height: 500,
            extra: SettingsMap::new(),
        }
    }
}

impl Default for ProductsSettings {
    fn default() -> Self {
        Self {
            title: "Featured Products".to_string(),
            count: 4,
            columns: 4,
            show_price: true,
            extra: SettingsMap::new(),
        }
    }
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            content: "Add your text here. Click to edit this content.".to_string(),
            font_size: FontSize::Medium,
            alignment: Alignment::Left,
            color: "#333333".to_string(),
            extra: SettingsMap::new(),
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            src: "https://via.placeholder.com/800x400".to_string(),
            alt: "Image".to_string(),
            width: "100%".to_string(),
            height: "auto".to_string(),
            link: String::new(),
            extra: SettingsMap::new(),
        }
    }
}

impl Default for CategoriesSettings {
    fn default() -> Self {
        Self {
            title: "Shop by Category".to_string(),
            count: 4,
            extra: SettingsMap::new(),
        }
    }
}

impl Default for TestimonialsSettings {
    fn default() -> Self {
        let testimonial = |name: &str, role: &str, quote: &str| Testimonial {
            name: name.to_string(),
            role: role.to_string(),
            quote: quote.to_string(),
        };

        Self {
            title: "What Our Customers Say".to_string(),
            testimonials: vec![
                testimonial("Sarah J.", "Verified Buyer", "Amazing quality and fast shipping!"),
                testimonial("Mike R.", "Verified Buyer", "Best purchase I've made this year."),
                testimonial("Emily K.", "Verified Buyer", "Great customer service, will buy again."),
            ],
            extra: SettingsMap::new(),
        }
    }
}

impl Default for CtaSettings {
    fn default() -> Self {
        Self {
            title: "Ready to Get Started?".to_string(),
            subtitle: "Join thousands of happy customers today.".to_string(),
            button_text: "Get Started".to_string(),
            button_link: "/products".to_string(),
            background_color: "#3b82f6".to_string(),
            text_color: "#ffffff".to_string(),
            extra: SettingsMap::new(),
        }
    }
}

impl Default for CustomHtmlSettings {
    fn default() -> Self {
        Self {
            html: "<div>Your custom HTML here</div>".to_string(),
            extra: SettingsMap::new(),
        }
    }
}

impl Default for CustomCssSettings {
    fn default() -> Self {
        Self {
            css: "/* Add your custom CSS here */".to_string(),
            extra: SettingsMap::new(),
        }
    }
}

impl Default for ColumnsSettings {
    fn default() -> Self {
        Self {
            column_count: 2,
            gap: 20,
            children: Vec::new(),
            extra: SettingsMap::new(),
        }
    }
}
