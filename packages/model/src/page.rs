//! Page addressing and page content.
//!
//! A store has one homepage, any number of custom pages, and three fixed
//! legal pages. Homepage and custom pages hold element sequences; legal
//! pages hold only a title and a body.

use crate::element::BuilderElement;
use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalKey {
    Privacy,
    Terms,
    Shipping,
}

impl LegalKey {
    pub const ALL: [LegalKey; 3] = [LegalKey::Privacy, LegalKey::Terms, LegalKey::Shipping];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegalKey::Privacy => "privacy",
            LegalKey::Terms => "terms",
            LegalKey::Shipping => "shipping",
        }
    }

    /// Title a legal page starts with before the owner edits it
    pub fn default_title(&self) -> &'static str {
        match self {
            LegalKey::Privacy => "Privacy Policy",
            LegalKey::Terms => "Terms of Service",
            LegalKey::Shipping => "Shipping Policy",
        }
    }
}

impl FromStr for LegalKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LegalKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ModelError::InvalidPageAddress(format!("legal:{}", s)))
    }
}

/// Which page's content is being edited or rendered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PageAddress {
    Homepage,
    Custom(String),
    Legal(LegalKey),
}

impl PageAddress {
    pub fn is_legal(&self) -> bool {
        matches!(self, PageAddress::Legal(_))
    }

    /// Filesystem-safe key (`homepage`, `custom-<id>`, `legal-<key>`)
    pub fn storage_key(&self) -> String {
        match self {
            PageAddress::Homepage => "homepage".to_string(),
            PageAddress::Custom(id) => format!("custom-{}", id),
            PageAddress::Legal(key) => format!("legal-{}", key.as_str()),
        }
    }
}

impl fmt::Display for PageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageAddress::Homepage => f.write_str("homepage"),
            PageAddress::Custom(id) => write!(f, "custom:{}", id),
            PageAddress::Legal(key) => write!(f, "legal:{}", key.as_str()),
        }
    }
}

impl FromStr for PageAddress {
    type Err = ModelError;

    /// Parses `homepage`, `custom:<id>` and `legal:<key>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if s == "homepage" => Ok(PageAddress::Homepage),
            Some(("custom", id)) if is_valid_page_id(id) => Ok(PageAddress::Custom(id.to_string())),
            Some(("legal", key)) => key.parse().map(PageAddress::Legal),
            _ => Err(ModelError::InvalidPageAddress(s.to_string())),
        }
    }
}

/// Page ids end up in file names and URLs
pub fn is_valid_page_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Custom page entry shown in the page selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPageMeta {
    pub id: String,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalPage {
    pub title: String,
    pub content: String,
}

impl LegalPage {
    pub fn empty(key: LegalKey) -> Self {
        Self {
            title: key.default_title().to_string(),
            content: String::new(),
        }
    }
}

/// What a page holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum PageContent {
    Elements(Vec<BuilderElement>),
    Legal(LegalPage),
}

impl PageContent {
    /// Content of a page that has never been saved
    pub fn empty_for(address: &PageAddress) -> Self {
        match address {
            PageAddress::Legal(key) => PageContent::Legal(LegalPage::empty(*key)),
            _ => PageContent::Elements(Vec::new()),
        }
    }

    pub fn elements(&self) -> &[BuilderElement] {
        match self {
            PageContent::Elements(elements) => elements,
            PageContent::Legal(_) => &[],
        }
    }
}

/// A column slot inside a columns element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSlot {
    pub columns_id: String,
    pub column_index: usize,
}

/// URL slug from a page title
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
