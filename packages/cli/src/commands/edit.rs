use super::{open_session, CommandError, PageTarget};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use storeblocks_editor::EditSession;
use storeblocks_model::ElementType;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Element type (hero, products, text, image, categories, testimonials,
    /// cta, customHTML, customCSS, columns)
    pub element_type: String,

    /// Add into a column slot instead of the page
    #[arg(long, value_name = "COLUMNS_ID:INDEX")]
    pub column: Option<String>,

    #[command(flatten)]
    pub target: PageTarget,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Id of the element to remove
    pub id: String,

    #[command(flatten)]
    pub target: PageTarget,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Current position of the element
    pub from: usize,

    /// Position to move it to
    pub to: usize,

    #[command(flatten)]
    pub target: PageTarget,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Id of the element to edit
    pub id: String,

    /// Settings key, as listed by the properties panel
    pub key: String,

    /// New value
    pub value: String,

    #[command(flatten)]
    pub target: PageTarget,
}

pub async fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.target).await?;

    let id = match &args.column {
        Some(column) => {
            let (columns_id, column_index) = parse_column(column)?;
            let element_type: ElementType = args.element_type.parse()?;
            session
                .add_element_to_column(columns_id, column_index, element_type)?
                .ok_or_else(|| CommandError::NotColumns(columns_id.to_string()))?
        }
        None => session.add_element_by_tag(&args.element_type)?,
    };

    save(&mut session).await?;
    println!("  {} Added {} {}", "✓".green(), args.element_type, id.bright_white());
    Ok(())
}

pub async fn remove(args: RemoveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.target).await?;

    if !session.remove_element(&args.id)? {
        return Err(CommandError::ElementNotFound(args.id).into());
    }

    save(&mut session).await?;
    println!("  {} Removed {}", "✓".green(), args.id.bright_white());
    Ok(())
}

pub async fn move_element(args: MoveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.target).await?;

    if !session.reorder(args.from, Some(args.to))? {
        println!("{}", "⚠️  Nothing to move".yellow());
        return Ok(());
    }

    save(&mut session).await?;
    println!("  {} Moved {} → {}", "✓".green(), args.from, args.to);
    Ok(())
}

pub async fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.target).await?;

    if !session.select(&args.id) {
        return Err(CommandError::ElementNotFound(args.id).into());
    }
    session.set_property(&args.key, &args.value)?;

    save(&mut session).await?;
    println!(
        "  {} {}.{} = {}",
        "✓".green(),
        args.id,
        args.key,
        args.value.bright_white()
    );
    Ok(())
}

async fn save(session: &mut EditSession) -> Result<()> {
    if session.is_dirty() {
        let revision = session.save().await?;
        println!("  {} Saved {} (revision {})", "✓".green(), session.address(), revision);
    }
    Ok(())
}

fn parse_column(target: &str) -> Result<(&str, usize), CommandError> {
    let invalid = || CommandError::InvalidColumnTarget(target.to_string());

    let (columns_id, index) = target.rsplit_once(':').ok_or_else(invalid)?;
    let index = index.parse().map_err(|_| invalid())?;
    if columns_id.is_empty() {
        return Err(invalid());
    }
    Ok((columns_id, index))
}
