mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, init, move_element, pages, remove, render, set, AddArgs, InitArgs, MoveArgs, PagesArgs,
    RemoveArgs, RenderArgs, SetArgs,
};
use tracing_subscriber::EnvFilter;

/// Storeblocks CLI - Build storefront pages from blocks
#[derive(Parser, Debug)]
#[command(name = "storeblocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor and render activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new store
    Init(InitArgs),

    /// Render a page to HTML
    Render(RenderArgs),

    /// Add an element to a page
    Add(AddArgs),

    /// Remove an element from a page
    Remove(RemoveArgs),

    /// Move an element to another position
    Move(MoveArgs),

    /// Set one property of an element
    Set(SetArgs),

    /// List or create pages
    Pages(PagesArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd).await,
        Command::Render(args) => render(args, &cwd).await,
        Command::Add(args) => add(args, &cwd).await,
        Command::Remove(args) => remove(args, &cwd).await,
        Command::Move(args) => move_element(args, &cwd).await,
        Command::Set(args) => set(args, &cwd).await,
        Command::Pages(args) => pages(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
