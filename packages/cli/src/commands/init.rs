use super::render::PRODUCTS_FILE;
use super::{open_session, PageTarget};
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use storeblocks_model::{ElementType, Product};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store id to create
    #[arg(short, long, default_value = "default")]
    pub store: String,

    /// Data directory
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Storeblocks store...".bright_blue().bold());

    let config = Config {
        data_dir: args.data_dir.clone(),
        store_id: args.store.clone(),
        ..Config::default()
    };

    let store_dir = config.get_data_dir(cwd).join(&args.store);
    if !store_dir.exists() {
        fs::create_dir_all(&store_dir)?;
        println!("  {} Created {}/{}/", "✓".green(), args.data_dir, args.store);
    }

    let products_path = store_dir.join(PRODUCTS_FILE);
    if !products_path.exists() {
        fs::write(&products_path, serde_json::to_string_pretty(&sample_products())?)?;
        println!("  {} Created {}", "✓".green(), PRODUCTS_FILE);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Starter homepage, only for a store that has never saved one
    let target = PageTarget {
        store: None,
        page: "homepage".to_string(),
    };
    let mut session = open_session(&config, cwd, &target).await?;
    if session.document().revision() == 0 && session.elements().is_empty() {
        for element_type in [ElementType::Hero, ElementType::Products, ElementType::Cta] {
            session.add_element(element_type)?;
        }
        session.save().await?;
        println!("  {} Created starter homepage", "✓".green());
    }

    println!();
    println!("{}", "✅ Store initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: storeblocks pages");
    println!("  2. Run: storeblocks add text");
    println!("  3. Run: storeblocks render --out index.html");

    Ok(())
}

fn sample_products() -> Vec<Product> {
    [
        ("Classic Tee", 19.99, "Clothing"),
        ("Denim Jacket", 79.0, "Clothing"),
        ("Trail Runner", 119.5, "Shoes"),
        ("Canvas Tote", 24.0, "Accessories"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, price, category))| Product {
        id: format!("p{}", i + 1),
        name: name.to_string(),
        price,
        image: String::new(),
        slug: name.to_lowercase().replace(' ', "-"),
        category: category.to_string(),
    })
    .collect()
}
