pub mod edit;
pub mod init;
pub mod pages;
pub mod render;

pub use edit::{add, move_element, remove, set, AddArgs, MoveArgs, RemoveArgs, SetArgs};
pub use init::{init, InitArgs};
pub use pages::{pages, PagesArgs};
pub use render::{render, RenderArgs};

use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use storeblocks_editor::{EditSession, FilePageStore, TracingNotifier};
use storeblocks_model::PageAddress;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Data directory does not exist: {0} (run `storeblocks init` first)")]
    MissingDataDir(PathBuf),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("{0} is not a columns element")]
    NotColumns(String),

    #[error("Invalid column target \"{0}\", expected <columns-id>:<index>")]
    InvalidColumnTarget(String),
}

/// Which store and page a command works on
#[derive(Debug, Args)]
pub struct PageTarget {
    /// Store id (defaults to the configured store)
    #[arg(short, long)]
    pub store: Option<String>,

    /// Page address: homepage, custom:<id> or legal:<privacy|terms|shipping>
    #[arg(short, long, default_value = "homepage")]
    pub page: String,
}

impl PageTarget {
    pub fn address(&self) -> Result<PageAddress> {
        Ok(self.page.parse()?)
    }
}

pub fn open_store(config: &Config, cwd: &str) -> Result<Arc<FilePageStore>> {
    let data_dir = config.get_data_dir(cwd);
    if !data_dir.exists() {
        return Err(CommandError::MissingDataDir(data_dir).into());
    }
    Ok(Arc::new(FilePageStore::new(data_dir)))
}

/// Editing session with the target page loaded
pub async fn open_session(config: &Config, cwd: &str, target: &PageTarget) -> Result<EditSession> {
    let store = open_store(config, cwd)?;
    let store_id = config.store(target.store.as_deref()).to_string();

    let mut session = EditSession::new(store_id, store, Arc::new(TracingNotifier))
        .with_undo_levels(config.undo_levels);
    session.open(target.address()?).await?;
    Ok(session)
}
