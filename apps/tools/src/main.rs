use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use data_model::{Catalog, CatalogSeed, Group, ImageBase, Item, Record, ALL_GROUPS};
use tracing_subscriber::EnvFilter;

mod settings;
mod simulate;

use settings::{load_settings, Settings};
use simulate::SimOp;

#[derive(Parser, Debug)]
#[command(name = "catalog-tool", about = "Inspect the grouped item catalog and its top-items windows")]
struct Cli {
    /// Settings file; defaults to ./catalog.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed catalog overriding the configured one.
    #[arg(long)]
    seed: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every group with its item and top-item counts.
    Groups,
    Group {
        key: String,
    },
    Item {
        key: String,
    },
    /// Print a group's top items in order.
    Top {
        group: String,
    },
    /// Print the whole catalog as JSON.
    Dump {
        #[arg(long)]
        pretty: bool,
    },
    /// Apply edits to a group, e.g. `insert:1:New-Key remove:0 move:3:0 replace:2:Key reset`.
    Simulate {
        group: String,
        #[arg(required = true)]
        ops: Vec<SimOp>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.seed_path = Some(seed);
    }
    init_tracing(&settings.log_filter);

    let mut catalog = build_catalog(&settings)?;

    match cli.command {
        Command::Groups => {
            for group in catalog.list_groups(ALL_GROUPS)? {
                println!(
                    "{}\t{}\titems={}\ttop={}",
                    group.unique_id(),
                    group.title(),
                    group.item_count(),
                    group.top_items().len()
                );
            }
        }
        Command::Group { key } => match catalog.find_group(&key) {
            Some(group) => print_group(group),
            None => println!("group '{key}' not found"),
        },
        Command::Item { key } => match catalog.find_item(&key) {
            Some(item) => print_item(&item),
            None => println!("item '{key}' not found"),
        },
        Command::Top { group } => match catalog.find_group(&group) {
            Some(group) => {
                for (index, item) in group.top_items().iter().enumerate() {
                    println!("{index:>2}  {}\t{}", item.unique_id(), item.title());
                }
            }
            None => println!("group '{group}' not found"),
        },
        Command::Dump { pretty } => {
            let snapshot = catalog.snapshot();
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{json}");
        }
        Command::Simulate { group, ops } => {
            let Some(target) = catalog.find_group_mut(&group) else {
                anyhow::bail!("group '{group}' not found");
            };
            for step in simulate::run(target, &ops)? {
                println!(
                    "{:<28} items={:<3} top=[{}]",
                    step.op.to_string(),
                    step.item_count,
                    step.top_items.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_catalog(settings: &Settings) -> Result<Catalog> {
    let image_base = ImageBase::parse(&settings.image_base_uri)?;
    let seed = match &settings.seed_path {
        Some(path) => CatalogSeed::from_path(path)
            .with_context(|| format!("failed to load seed catalog '{}'", path.display()))?,
        None => CatalogSeed::sample()?,
    };
    let catalog = Catalog::from_seed(&seed, image_base)?;
    tracing::info!(
        groups = catalog.groups().len(),
        items = seed.item_count(),
        "catalog ready"
    );
    Ok(catalog)
}

fn print_group(group: &Group) {
    println!("id:          {}", group.unique_id());
    println!("title:       {}", group.title());
    println!("subtitle:    {}", group.subtitle());
    if let Some(image) = group.image() {
        println!("image:       {}", image.uri());
    }
    println!("items:       {}", group.item_count());
    println!("top items:   {}", group.top_items().len());
    println!();
    println!("{}", group.description());
}

fn print_item(item: &Item) {
    println!("id:          {}", item.unique_id());
    println!("title:       {}", item.title());
    println!("subtitle:    {}", item.subtitle());
    println!("group:       {}", item.group_key());
    println!("span:        {}x{}", item.col_span(), item.row_span());
    if let Some(image) = item.image() {
        println!("image:       {}", image.uri());
    }
    println!();
    println!("{}", item.description());
    println!();
    println!("{}", item.content());
}
