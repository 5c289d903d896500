//! # Builder Elements
//!
//! A page is an ordered list of [`BuilderElement`]s. Each element carries a
//! typed settings record selected by its [`ElementType`]; `columns` elements
//! additionally own nested children tagged with a column slot.
//!
//! ## Wire format
//!
//! ```text
//! { "id": "…", "type": "hero", "settings": { … }, "parentId"?: "…", "columnIndex"?: 0 }
//! ```
//!
//! Decoding never fails on a recognised shape. An unknown `type` decodes to
//! [`ElementKind::Unknown`] with the raw data kept so it can be written back
//! untouched. A known type with a malformed setting keeps its type; only the
//! offending keys fall back to the type's defaults.

use crate::catalog;
use crate::settings::*;
use crate::{ModelError, SettingsMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of element types the catalog knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "hero")]
    Hero,
    #[serde(rename = "products")]
    Products,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "categories")]
    Categories,
    #[serde(rename = "testimonials")]
    Testimonials,
    #[serde(rename = "cta")]
    Cta,
    #[serde(rename = "customHTML")]
    CustomHtml,
    #[serde(rename = "customCSS")]
    CustomCss,
    #[serde(rename = "columns")]
    Columns,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Hero,
        ElementType::Products,
        ElementType::Text,
        ElementType::Image,
        ElementType::Categories,
        ElementType::Testimonials,
        ElementType::Cta,
        ElementType::CustomHtml,
        ElementType::CustomCss,
        ElementType::Columns,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Hero => "hero",
            ElementType::Products => "products",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Categories => "categories",
            ElementType::Testimonials => "testimonials",
            ElementType::Cta => "cta",
            ElementType::CustomHtml => "customHTML",
            ElementType::CustomCss => "customCSS",
            ElementType::Columns => "columns",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ModelError::UnknownElementType(s.to_string()))
    }
}

/// Element type together with its settings
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Hero(HeroSettings),
    Products(ProductsSettings),
    Text(TextSettings),
    Image(ImageSettings),
    Categories(CategoriesSettings),
    Testimonials(TestimonialsSettings),
    Cta(CtaSettings),
    CustomHtml(CustomHtmlSettings),
    CustomCss(CustomCssSettings),
    Columns(ColumnsSettings),

    /// Type tag the catalog does not recognise. Kept verbatim so a save
    /// round-trips it.
    Unknown { type_tag: String, settings: Value },
}

impl ElementKind {
    /// Decode settings for a known type. Missing keys take defaults; keys of
    /// the wrong shape are an error.
    pub fn from_parts(element_type: ElementType, settings: Value) -> Result<Self, ModelError> {
        let settings = match settings {
            Value::Null => Value::Object(SettingsMap::new()),
            other => other,
        };

        fn decode<T: serde::de::DeserializeOwned>(
            element_type: ElementType,
            settings: Value,
        ) -> Result<T, ModelError> {
            serde_json::from_value(settings)
                .map_err(|e| ModelError::invalid_settings(element_type.as_str(), e))
        }

        Ok(match element_type {
            ElementType::Hero => ElementKind::Hero(decode(element_type, settings)?),
            ElementType::Products => ElementKind::Products(decode(element_type, settings)?),
            ElementType::Text => ElementKind::Text(decode(element_type, settings)?),
            ElementType::Image => ElementKind::Image(decode(element_type, settings)?),
            ElementType::Categories => ElementKind::Categories(decode(element_type, settings)?),
            ElementType::Testimonials => ElementKind::Testimonials(decode(element_type, settings)?),
            ElementType::Cta => ElementKind::Cta(decode(element_type, settings)?),
            ElementType::CustomHtml => ElementKind::CustomHtml(decode(element_type, settings)?),
            ElementType::CustomCss => ElementKind::CustomCss(decode(element_type, settings)?),
            ElementType::Columns => ElementKind::Columns(decode(element_type, settings)?),
        })
    }

    /// Decode loaded data. Never fails: an unrecognised type tag is kept as
    /// [`ElementKind::Unknown`], and a stored value of the wrong shape is
    /// dropped so that key takes the type's default.
    pub fn decode(type_tag: &str, settings: Value) -> Self {
        let Ok(element_type) = type_tag.parse::<ElementType>() else {
            return ElementKind::Unknown {
                type_tag: type_tag.to_string(),
                settings,
            };
        };

        if let Ok(kind) = ElementKind::from_parts(element_type, settings.clone()) {
            return kind;
        }

        let stored = match settings {
            Value::Object(map) => map,
            other => {
                tracing::warn!(type_tag, settings = %other, "Settings are not an object, using defaults");
                SettingsMap::new()
            }
        };

        let mut accepted = SettingsMap::new();
        for (key, value) in stored {
            let mut candidate = accepted.clone();
            candidate.insert(key.clone(), value);
            match ElementKind::from_parts(element_type, Value::Object(candidate.clone())) {
                Ok(_) => accepted = candidate,
                Err(e) => {
                    tracing::warn!(type_tag, key = %key, error = %e, "Malformed setting, using default");
                }
            }
        }

        ElementKind::from_parts(element_type, Value::Object(accepted))
            .unwrap_or_else(|_| catalog::template(element_type))
    }

    pub fn element_type(&self) -> Option<ElementType> {
        Some(match self {
            ElementKind::Hero(_) => ElementType::Hero,
            ElementKind::Products(_) => ElementType::Products,
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Categories(_) => ElementType::Categories,
            ElementKind::Testimonials(_) => ElementType::Testimonials,
            ElementKind::Cta(_) => ElementType::Cta,
            ElementKind::CustomHtml(_) => ElementType::CustomHtml,
            ElementKind::CustomCss(_) => ElementType::CustomCss,
            ElementKind::Columns(_) => ElementType::Columns,
            ElementKind::Unknown { .. } => return None,
        })
    }

    pub fn type_tag(&self) -> &str {
        match self {
            ElementKind::Unknown { type_tag, .. } => type_tag,
            known => known.element_type().map(|ty| ty.as_str()).unwrap_or_default(),
        }
    }

    /// Settings as an open JSON bag
    pub fn settings_value(&self) -> Value {
        let encoded = match self {
            ElementKind::Hero(s) => serde_json::to_value(s),
            ElementKind::Products(s) => serde_json::to_value(s),
            ElementKind::Text(s) => serde_json::to_value(s),
            ElementKind::Image(s) => serde_json::to_value(s),
            ElementKind::Categories(s) => serde_json::to_value(s),
            ElementKind::Testimonials(s) => serde_json::to_value(s),
            ElementKind::Cta(s) => serde_json::to_value(s),
            ElementKind::CustomHtml(s) => serde_json::to_value(s),
            ElementKind::CustomCss(s) => serde_json::to_value(s),
            ElementKind::Columns(s) => serde_json::to_value(s),
            ElementKind::Unknown { settings, .. } => return settings.clone(),
        };
        // Settings records only hold string keys, so encoding cannot fail
        encoded.unwrap_or_else(|_| Value::Object(SettingsMap::new()))
    }

    pub fn settings_map(&self) -> SettingsMap {
        match self.settings_value() {
            Value::Object(map) => map,
            _ => SettingsMap::new(),
        }
    }

    /// Shallow merge: patch keys overwrite, absent keys are kept
    pub fn merged(&self, patch: &SettingsMap) -> Result<Self, ModelError> {
        let mut settings = self.settings_map();
        for (key, value) in patch {
            settings.insert(key.clone(), value.clone());
        }

        match self.element_type() {
            Some(element_type) => ElementKind::from_parts(element_type, Value::Object(settings)),
            None => Ok(ElementKind::Unknown {
                type_tag: self.type_tag().to_string(),
                settings: Value::Object(settings),
            }),
        }
    }

    /// Replace the whole settings bag, keeping the type
    pub fn replaced(&self, settings: SettingsMap) -> Result<Self, ModelError> {
        match self.element_type() {
            Some(element_type) => ElementKind::from_parts(element_type, Value::Object(settings)),
            None => Ok(ElementKind::Unknown {
                type_tag: self.type_tag().to_string(),
                settings: Value::Object(settings),
            }),
        }
    }
}

/// One content block on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawElement", into = "RawElement")]
pub struct BuilderElement {
    pub id: String,
    pub kind: ElementKind,
    /// Owning columns element, for column children only
    pub parent_id: Option<String>,
    /// Column slot, for column children only
    pub column_index: Option<usize>,
}

impl BuilderElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id: None,
            column_index: None,
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.kind.element_type()
    }

    pub fn type_tag(&self) -> &str {
        self.kind.type_tag()
    }

    pub fn is_columns(&self) -> bool {
        matches!(self.kind, ElementKind::Columns(_))
    }

    pub fn columns(&self) -> Option<&ColumnsSettings> {
        match &self.kind {
            ElementKind::Columns(settings) => Some(settings),
            _ => None,
        }
    }

    pub fn columns_mut(&mut self) -> Option<&mut ColumnsSettings> {
        match &mut self.kind {
            ElementKind::Columns(settings) => Some(settings),
            _ => None,
        }
    }

    /// Nested column children (empty for every other type)
    pub fn children(&self) -> &[BuilderElement] {
        self.columns().map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    /// Tag this element as living in a column slot
    pub fn into_column(mut self, parent_id: impl Into<String>, column_index: usize) -> Self {
        self.parent_id = Some(parent_id.into());
        self.column_index = Some(column_index);
        self
    }
}

/// Serialized shape of a [`BuilderElement`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    id: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    settings: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column_index: Option<usize>,
}

impl From<RawElement> for BuilderElement {
    fn from(raw: RawElement) -> Self {
        Self {
            kind: ElementKind::decode(&raw.type_tag, raw.settings),
            id: raw.id,
            parent_id: raw.parent_id,
            column_index: raw.column_index,
        }
    }
}

impl From<BuilderElement> for RawElement {
    fn from(element: BuilderElement) -> Self {
        Self {
            settings: element.kind.settings_value(),
            type_tag: element.kind.type_tag().to_string(),
            id: element.id,
            parent_id: element.parent_id,
            column_index: element.column_index,
        }
    }
}
