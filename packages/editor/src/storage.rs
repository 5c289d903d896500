//! # Page Storage
//!
//! Persistence collaborator for page content.
//!
//! The store is opaque key-value storage keyed by `(store id, page address)`.
//! Every write bumps a per-page revision. A save names the revision it
//! expects to overwrite; a mismatch is a [`StoreError::Conflict`] unless the
//! caller forces the write (last writer wins).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use storeblocks_model::page::{is_valid_page_id, slugify};
use storeblocks_model::{CustomPageMeta, IdGenerator, PageAddress, PageContent};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Revision conflict: expected {expected}, store has {actual}")]
    Conflict { expected: u64, actual: u64 },

    #[error("Invalid store id: {0}")]
    InvalidStoreId(String),

    #[error("Content does not match page {0}")]
    ContentMismatch(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Page content together with its store revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPage {
    pub content: PageContent,
    /// 0 for a page that has never been saved
    pub revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredPage {
    pub fn unsaved(address: &PageAddress) -> Self {
        Self {
            content: PageContent::empty_for(address),
            revision: 0,
            updated_at: None,
        }
    }
}

/// How a save treats concurrent writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Fail unless the store is still at this revision
    IfRevision(u64),
    /// Overwrite whatever is stored
    Force,
}

impl SaveMode {
    pub(crate) fn check(&self, current: u64) -> Result<(), StoreError> {
        match self {
            SaveMode::IfRevision(expected) if *expected != current => Err(StoreError::Conflict {
                expected: *expected,
                actual: current,
            }),
            _ => Ok(()),
        }
    }
}

/// Persistence collaborator
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Load a page; a page that was never saved loads empty at revision 0
    async fn load_page(&self, store_id: &str, address: &PageAddress) -> Result<StoredPage, StoreError>;

    /// Overwrite a page, returning its new revision
    async fn save_page(
        &self,
        store_id: &str,
        address: &PageAddress,
        content: &PageContent,
        mode: SaveMode,
    ) -> Result<u64, StoreError>;

    /// Custom pages shown in the page selector
    async fn list_custom_pages(&self, store_id: &str) -> Result<Vec<CustomPageMeta>, StoreError>;

    /// Register a new, empty custom page
    async fn create_custom_page(
        &self,
        store_id: &str,
        title: &str,
        slug: Option<&str>,
    ) -> Result<CustomPageMeta, StoreError>;
}

pub(crate) fn check_store_id(store_id: &str) -> Result<(), StoreError> {
    if is_valid_page_id(store_id) {
        Ok(())
    } else {
        Err(StoreError::InvalidStoreId(store_id.to_string()))
    }
}

/// Legal addresses hold legal content, every other address holds elements
pub(crate) fn check_content(address: &PageAddress, content: &PageContent) -> Result<(), StoreError> {
    let matches = matches!(
        (address, content),
        (PageAddress::Legal(_), PageContent::Legal(_))
            | (PageAddress::Homepage | PageAddress::Custom(_), PageContent::Elements(_))
    );

    if matches {
        Ok(())
    } else {
        Err(StoreError::ContentMismatch(address.to_string()))
    }
}

/// New custom page entry with a fresh id
pub(crate) fn new_custom_page(
    store_id: &str,
    existing: &[CustomPageMeta],
    title: &str,
    slug: Option<&str>,
) -> CustomPageMeta {
    let mut ids = IdGenerator::new(&format!("{}/pages", store_id));
    for page in existing {
        ids.observe(&page.id);
    }

    let slug = match slug {
        Some(slug) if !slug.trim().is_empty() => slugify(slug),
        _ => slugify(title),
    };

    CustomPageMeta {
        id: ids.new_id(),
        title: title.to_string(),
        slug,
    }
}

#[derive(Debug, Default)]
struct StoreData {
    pages: HashMap<PageAddress, StoredPage>,
    custom_pages: Vec<CustomPageMeta>,
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    stores: Mutex<HashMap<String, StoreData>>,
    fail_saves: AtomicBool,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with a backend error
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn with_store<T>(
        &self,
        store_id: &str,
        f: impl FnOnce(&mut StoreData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        check_store_id(store_id)?;
        let mut stores = self
            .stores
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        f(stores.entry(store_id.to_string()).or_default())
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn load_page(&self, store_id: &str, address: &PageAddress) -> Result<StoredPage, StoreError> {
        self.with_store(store_id, |data| {
            if let PageAddress::Custom(id) = address {
                if !data.custom_pages.iter().any(|page| &page.id == id) {
                    return Err(StoreError::PageNotFound(address.to_string()));
                }
            }

            Ok(data
                .pages
                .get(address)
                .cloned()
                .unwrap_or_else(|| StoredPage::unsaved(address)))
        })
    }

    async fn save_page(
        &self,
        store_id: &str,
        address: &PageAddress,
        content: &PageContent,
        mode: SaveMode,
    ) -> Result<u64, StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("save rejected".to_string()));
        }
        check_content(address, content)?;

        self.with_store(store_id, |data| {
            if let PageAddress::Custom(id) = address {
                if !data.custom_pages.iter().any(|page| &page.id == id) {
                    return Err(StoreError::PageNotFound(address.to_string()));
                }
            }

            let current = data.pages.get(address).map(|page| page.revision).unwrap_or(0);
            mode.check(current)?;

            let revision = current + 1;
            data.pages.insert(
                address.clone(),
                StoredPage {
                    content: content.clone(),
                    revision,
                    updated_at: Some(Utc::now()),
                },
            );
            Ok(revision)
        })
    }

    async fn list_custom_pages(&self, store_id: &str) -> Result<Vec<CustomPageMeta>, StoreError> {
        self.with_store(store_id, |data| Ok(data.custom_pages.clone()))
    }

    async fn create_custom_page(
        &self,
        store_id: &str,
        title: &str,
        slug: Option<&str>,
    ) -> Result<CustomPageMeta, StoreError> {
        self.with_store(store_id, |data| {
            let page = new_custom_page(store_id, &data.custom_pages, title, slug);
            data.custom_pages.push(page.clone());
            Ok(page)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeblocks_model::{catalog, ElementType, LegalKey, LegalPage};

    fn homepage_with_hero() -> PageContent {
        PageContent::Elements(vec![catalog::instantiate(ElementType::Hero, "hero-1")])
    }

    #[tokio::test]
    async fn test_unsaved_page_loads_empty() {
        let store = MemoryPageStore::new();
        let page = store.load_page("shop", &PageAddress::Homepage).await.unwrap();

        assert_eq!(page.revision, 0);
        assert!(page.content.elements().is_empty());
    }

    #[tokio::test]
    async fn test_save_bumps_revision() {
        let store = MemoryPageStore::new();
        let address = PageAddress::Homepage;

        let first = store
            .save_page("shop", &address, &homepage_with_hero(), SaveMode::IfRevision(0))
            .await
            .unwrap();
        let second = store
            .save_page("shop", &address, &homepage_with_hero(), SaveMode::IfRevision(1))
            .await
            .unwrap();

        assert_eq!((first, second), (1, 2));
        let page = store.load_page("shop", &address).await.unwrap();
        assert_eq!(page.revision, 2);
        assert!(page.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_stale_revision_conflicts() {
        let store = MemoryPageStore::new();
        let address = PageAddress::Homepage;
        store
            .save_page("shop", &address, &homepage_with_hero(), SaveMode::Force)
            .await
            .unwrap();

        let result = store
            .save_page("shop", &address, &homepage_with_hero(), SaveMode::IfRevision(0))
            .await;
        assert_eq!(result, Err(StoreError::Conflict { expected: 0, actual: 1 }));

        let forced = store
            .save_page("shop", &address, &homepage_with_hero(), SaveMode::Force)
            .await;
        assert_eq!(forced, Ok(2));
    }

    #[tokio::test]
    async fn test_unknown_custom_page_is_not_found() {
        let store = MemoryPageStore::new();
        let result = store
            .load_page("shop", &PageAddress::Custom("nope".to_string()))
            .await;

        assert!(matches!(result, Err(StoreError::PageNotFound(_))));
    }

    #[tokio::test]
    async fn test_created_custom_pages_get_fresh_ids() {
        let store = MemoryPageStore::new();
        let about = store.create_custom_page("shop", "About Us", None).await.unwrap();
        let faq = store
            .create_custom_page("shop", "Questions", Some("FAQ"))
            .await
            .unwrap();

        assert_ne!(about.id, faq.id);
        assert_eq!(about.slug, "about-us");
        assert_eq!(faq.slug, "faq");

        let pages = store.list_custom_pages("shop").await.unwrap();
        assert_eq!(pages, vec![about.clone(), faq]);

        let page = store
            .load_page("shop", &PageAddress::Custom(about.id))
            .await
            .unwrap();
        assert!(page.content.elements().is_empty());
    }

    #[tokio::test]
    async fn test_content_must_match_address() {
        let store = MemoryPageStore::new();
        let legal = PageContent::Legal(LegalPage::empty(LegalKey::Terms));

        let result = store
            .save_page("shop", &PageAddress::Homepage, &legal, SaveMode::Force)
            .await;
        assert!(matches!(result, Err(StoreError::ContentMismatch(_))));
    }

    #[tokio::test]
    async fn test_invalid_store_id() {
        let store = MemoryPageStore::new();
        let result = store.load_page("../etc", &PageAddress::Homepage).await;
        assert!(matches!(result, Err(StoreError::InvalidStoreId(_))));
    }
}
