//! File-backed page store.
//!
//! ```text
//! <root>/<store_id>/custom_pages.json
//! <root>/<store_id>/pages/<page key>.json
//! ```
//!
//! Writes go to a temporary file that is renamed into place, and saves are
//! serialized per process so the revision check and the write cannot
//! interleave.

use crate::storage::{
    check_content, check_store_id, new_custom_page, PageStore, SaveMode, StoreError, StoredPage,
};
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use storeblocks_model::{CustomPageMeta, PageAddress, PageContent};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

const CUSTOM_PAGES_FILE: &str = "custom_pages.json";
const PAGES_DIR: &str = "pages";

#[derive(Debug)]
pub struct FilePageStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one store's data
    pub fn store_dir(&self, store_id: &str) -> Result<PathBuf, StoreError> {
        check_store_id(store_id)?;
        Ok(self.root.join(store_id))
    }

    fn page_path(&self, store_id: &str, address: &PageAddress) -> Result<PathBuf, StoreError> {
        Ok(self
            .store_dir(store_id)?
            .join(PAGES_DIR)
            .join(format!("{}.json", address.storage_key())))
    }

    async fn custom_pages(&self, store_id: &str) -> Result<Vec<CustomPageMeta>, StoreError> {
        let path = self.store_dir(store_id)?.join(CUSTOM_PAGES_FILE);
        Ok(read_json(&path).await?.unwrap_or_default())
    }

    async fn ensure_custom_page(&self, store_id: &str, address: &PageAddress) -> Result<(), StoreError> {
        if let PageAddress::Custom(id) = address {
            let pages = self.custom_pages(store_id).await?;
            if !pages.iter().any(|page| &page.id == id) {
                return Err(StoreError::PageNotFound(address.to_string()));
            }
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok(Some(serde_json::from_str(&source)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let source = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, source).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl PageStore for FilePageStore {
    #[instrument(skip(self, address), fields(address = %address))]
    async fn load_page(&self, store_id: &str, address: &PageAddress) -> Result<StoredPage, StoreError> {
        self.ensure_custom_page(store_id, address).await?;

        let path = self.page_path(store_id, address)?;
        let page = read_json::<StoredPage>(&path)
            .await?
            .unwrap_or_else(|| StoredPage::unsaved(address));

        debug!(revision = page.revision, "Loaded page from disk");
        Ok(page)
    }

    #[instrument(skip(self, address, content), fields(address = %address))]
    async fn save_page(
        &self,
        store_id: &str,
        address: &PageAddress,
        content: &PageContent,
        mode: SaveMode,
    ) -> Result<u64, StoreError> {
        check_content(address, content)?;
        let _guard = self.write_lock.lock().await;

        self.ensure_custom_page(store_id, address).await?;

        let path = self.page_path(store_id, address)?;
        let current = read_json::<StoredPage>(&path)
            .await?
            .map(|page| page.revision)
            .unwrap_or(0);
        mode.check(current)?;

        let page = StoredPage {
            content: content.clone(),
            revision: current + 1,
            updated_at: Some(Utc::now()),
        };
        write_json(&path, &page).await?;

        debug!(revision = page.revision, path = %path.display(), "Wrote page to disk");
        Ok(page.revision)
    }

    async fn list_custom_pages(&self, store_id: &str) -> Result<Vec<CustomPageMeta>, StoreError> {
        self.custom_pages(store_id).await
    }

    async fn create_custom_page(
        &self,
        store_id: &str,
        title: &str,
        slug: Option<&str>,
    ) -> Result<CustomPageMeta, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut pages = self.custom_pages(store_id).await?;
        let page = new_custom_page(store_id, &pages, title, slug);
        pages.push(page.clone());

        let path = self.store_dir(store_id)?.join(CUSTOM_PAGES_FILE);
        write_json(&path, &pages).await?;
        Ok(page)
    }
}
