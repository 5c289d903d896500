use super::{open_store, PageTarget};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use storeblocks_editor::{FilePageStore, PageStore};
use storeblocks_model::{PageAddress, PageContent, Product};
use storeblocks_render::{
    render_canvas, render_legal, render_page, to_document, CanvasState, HtmlOptions,
    RenderContext, StoreNavigator,
};
use tracing::debug;

pub const PRODUCTS_FILE: &str = "products.json";

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub target: PageTarget,

    /// Render the editing canvas instead of the storefront
    #[arg(long)]
    pub edit: bool,

    /// Product list (defaults to products.json in the store directory)
    #[arg(long)]
    pub products: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Skip indentation regardless of config
    #[arg(long)]
    pub compact: bool,
}

pub async fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd)?;
    let store_id = config.store(args.target.store.as_deref());
    let address = args.target.address()?;

    let stored = store.load_page(store_id, &address).await?;
    let options = if config.pretty && !args.compact {
        HtmlOptions::default()
    } else {
        HtmlOptions::compact()
    };

    let html = match &stored.content {
        PageContent::Legal(page) => to_document(&page.title, &[render_legal(page)], options),
        PageContent::Elements(elements) => {
            let title = page_title(&store, store_id, &address).await?;
            if args.edit {
                let canvas = render_canvas(elements, &CanvasState::default());
                to_document(&title, &[canvas], options)
            } else {
                let products_path = match &args.products {
                    Some(path) => path.clone(),
                    None => store.store_dir(store_id)?.join(PRODUCTS_FILE),
                };
                let products = load_products(&products_path).await?;
                let navigator = StoreNavigator::new(&config.route_prefix, store_id);
                let ctx = RenderContext::view(store_id, &products, &navigator);
                to_document(&title, &[render_page(elements, &ctx)], options)
            }
        }
    };

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("  {} {} → {}", "✓".green(), address, path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

async fn page_title(store: &FilePageStore, store_id: &str, address: &PageAddress) -> Result<String> {
    let title = match address {
        PageAddress::Custom(id) => store
            .list_custom_pages(store_id)
            .await?
            .into_iter()
            .find(|page| &page.id == id)
            .map(|page| page.title),
        _ => None,
    };
    Ok(title.unwrap_or_else(|| "Home".to_string()))
}

/// Products for data-bound blocks. A missing file is an empty catalog.
pub async fn load_products(path: &Path) -> Result<Vec<Product>> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => serde_json::from_str(&source)
            .with_context(|| format!("Invalid product list {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No product list, rendering without products");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}
