use super::{open_session, open_store, PageTarget};
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use storeblocks_editor::PageStore;
use storeblocks_model::{LegalKey, PageAddress};

#[derive(Debug, Args)]
pub struct PagesArgs {
    #[command(subcommand)]
    pub action: Option<PagesAction>,

    /// Store id (defaults to the configured store)
    #[arg(short, long, global = true)]
    pub store: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PagesAction {
    /// List the store's pages (default)
    List,

    /// Create an empty custom page
    Create {
        /// Page title
        title: String,

        /// URL slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,
    },
}

pub async fn pages(args: PagesArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    match args.action.unwrap_or(PagesAction::List) {
        PagesAction::List => list(&config, cwd, args.store.as_deref()).await,
        PagesAction::Create { title, slug } => {
            let target = PageTarget {
                store: args.store,
                page: PageAddress::Homepage.to_string(),
            };
            let mut session = open_session(&config, cwd, &target).await?;
            let page = session.create_custom_page(&title, slug.as_deref()).await?;

            println!(
                "  {} Created {} ({})",
                "✓".green(),
                page.title.bright_white(),
                PageAddress::Custom(page.id).to_string().dimmed()
            );
            Ok(())
        }
    }
}

async fn list(config: &Config, cwd: &str, store: Option<&str>) -> Result<()> {
    let store_id = config.store(store);
    let page_store = open_store(config, cwd)?;

    println!("{}", format!("📄 Pages of {}", store_id).bright_blue().bold());
    print_page(&*page_store, store_id, PageAddress::Homepage, "Home", "/").await?;

    for page in page_store.list_custom_pages(store_id).await? {
        let path = format!("/{}", page.slug);
        print_page(&*page_store, store_id, PageAddress::Custom(page.id), &page.title, &path).await?;
    }

    for key in LegalKey::ALL {
        let path = format!("/{}", key.as_str());
        print_page(&*page_store, store_id, PageAddress::Legal(key), key.default_title(), &path).await?;
    }

    Ok(())
}

async fn print_page(
    store: &dyn PageStore,
    store_id: &str,
    address: PageAddress,
    title: &str,
    path: &str,
) -> Result<()> {
    let stored = store.load_page(store_id, &address).await?;
    let status = if stored.revision == 0 {
        "unsaved".yellow()
    } else {
        format!("rev {}", stored.revision).green()
    };

    println!(
        "  {:<24} {:<28} {:<20} {}",
        address.to_string(),
        title.bright_white(),
        path.dimmed(),
        status
    );
    Ok(())
}
