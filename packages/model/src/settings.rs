//! Typed settings, one record per element type.
//!
//! Every record decodes with `#[serde(default)]`, so a key missing from
//! stored data takes the catalog default. Keys a record does not know are
//! kept in `extra` and written back unchanged.

use crate::de::{lenient_bool, lenient_f64, lenient_u32};
use crate::element::BuilderElement;
use crate::SettingsMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSettings {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub background_image: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub overlay_opacity: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub height: u32,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductsSettings {
    pub title: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub columns: u32,
    #[serde(deserialize_with = "lenient_bool")]
    pub show_price: bool,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSettings {
    pub content: String,
    pub font_size: FontSize,
    pub alignment: Alignment,
    pub color: String,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSettings {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub link: String,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoriesSettings {
    pub title: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsSettings {
    pub title: String,
    pub testimonials: Vec<Testimonial>,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaSettings {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomHtmlSettings {
    pub html: String,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomCssSettings {
    pub css: String,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnsSettings {
    #[serde(deserialize_with = "lenient_u32")]
    pub column_count: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub gap: u32,
    pub children: Vec<BuilderElement>,
    #[serde(flatten)]
    pub extra: SettingsMap,
}

impl ColumnsSettings {
    /// Children stacked in one column slot, in insertion order
    pub fn column(&self, column_index: usize) -> impl Iterator<Item = &BuilderElement> {
        self.children
            .iter()
            .filter(move |child| child.column_index.unwrap_or(0) == column_index)
    }

    /// Smallest column count that keeps every child in range
    pub fn required_columns(&self) -> u32 {
        self.children
            .iter()
            .map(|child| child.column_index.unwrap_or(0) as u32 + 1)
            .max()
            .unwrap_or(1)
    }
}

/// Named font-size bucket for text blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

impl FontSize {
    pub const OPTIONS: [&'static str; 4] = ["small", "medium", "large", "xlarge"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
            FontSize::XLarge => "xlarge",
        }
    }

    /// Unrecognized buckets read as `medium`
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "small" => FontSize::Small,
            "large" => FontSize::Large,
            "xlarge" => FontSize::XLarge,
            _ => FontSize::Medium,
        }
    }

    pub fn pixels(&self) -> u32 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 20,
            FontSize::XLarge => 24,
        }
    }
}

impl Serialize for FontSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(FontSize::from_str_lossy(&value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const OPTIONS: [&'static str; 3] = ["left", "center", "right"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

impl Serialize for Alignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Alignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Alignment::from_str_lossy(&value))
    }
}

/// `#abc`, `abc`, `#AABBCC` → `#aabbcc`; anything else is not a color
pub fn normalize_hex(raw: &str) -> Option<String> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => Some(hex.chars().fold(String::from("#"), |mut acc, c| {
            let c = c.to_ascii_lowercase();
            acc.push(c);
            acc.push(c);
            acc
        })),
        6 => Some(format!("#{}", hex.to_ascii_lowercase())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("abc"), Some("#aabbcc".to_string()));
        assert_eq!(normalize_hex("#3B82F6"), Some("#3b82f6".to_string()));
        assert_eq!(normalize_hex("#ff"), None);
        assert_eq!(normalize_hex("blue"), None);
    }

    #[test]
    fn test_font_size_buckets() {
        assert_eq!(FontSize::from_str_lossy("xlarge").pixels(), 24);
        assert_eq!(FontSize::from_str_lossy("gigantic"), FontSize::Medium);
    }

    #[test]
    fn test_column_slots() {
        let child = |id: &str, column: usize| {
            crate::catalog::instantiate(crate::ElementType::Text, id).into_column("cols", column)
        };
        let columns = ColumnsSettings {
            children: vec![child("a", 1), child("b", 0), child("c", 1)],
            ..ColumnsSettings::default()
        };

        let second: Vec<&str> = columns.column(1).map(|c| c.id.as_str()).collect();
        assert_eq!(second, vec!["a", "c"]);
        assert_eq!(columns.required_columns(), 2);
    }
}
