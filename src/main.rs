use anyhow::{Context, Result};
use pokedex_sqlite::{
    cli::{Cli, Commands},
    config::default_db_path,
    LoadOptions, ProgressUi, Record, SilentUi, Store,
};
use serde::Serialize;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse_args();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    let mut store =
        Store::open(&db_path).with_context(|| format!("Failed to open {:?}", db_path))?;

    match cli.command {
        Commands::Load {
            csv,
            separator,
            if_missing,
        } => {
            if if_missing && store.exists()? {
                println!("{:?} already holds {} records; skipping load", db_path, store.count()?);
            } else {
                let start = Instant::now();
                let options = LoadOptions::with_separator(separator);

                let record_count = if cli.quiet {
                    store.load_with(&csv, &options, &mut SilentUi::new())
                } else {
                    store.load_with(&csv, &options, &mut ProgressUi::new())
                }
                .with_context(|| format!("Failed to load {:?}", csv))?;

                println!(
                    "Loaded {} records from {:?} into {:?} in {:.1}s",
                    record_count,
                    csv,
                    db_path,
                    start.elapsed().as_secs_f64()
                );
            }
        }

        Commands::Status => {
            let loaded = store.exists()?;
            let count = if loaded { store.count()? } else { 0 };
            if cli.json {
                print_json(&serde_json::json!({
                    "database": db_path,
                    "loaded": loaded,
                    "records": count,
                }))?;
            } else if loaded {
                println!("{:?}: {} records", db_path, count);
            } else {
                println!("{:?}: no dataset loaded", db_path);
            }
        }

        Commands::Names => print_list(&store.list_names()?, cli.json)?,

        Commands::Ids => print_list(&store.list_species_ids()?, cli.json)?,

        Commands::Get { name } => {
            let record = store.get_by_name(&name.to_lowercase())?;
            print_record(&record, cli.json)?;
        }

        Commands::Id { species_id } => {
            let record = store.get_by_id(species_id)?;
            print_record(&record, cli.json)?;
        }

        Commands::Types => print_list(&store.list_types()?, cli.json)?,

        Commands::ByType { kind } => {
            print_list(&store.list_by_type(&kind.to_lowercase())?, cli.json)?
        }
    }

    store.close().context("Failed to close database")?;

    Ok(())
}

/// Diagnostics go to stderr so stdout stays pipeable
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list<T: Serialize + std::fmt::Display>(items: &[T], json: bool) -> Result<()> {
    if json {
        return print_json(items);
    }
    for item in items {
        println!("{}", item);
    }
    Ok(())
}

fn print_record(record: &Record, json: bool) -> Result<()> {
    if json {
        return print_json(record);
    }
    println!("name:                    {}", record.name);
    println!("species_id:              {}", record.species_id);
    println!("height:                  {}", record.height);
    println!("weight:                  {}", record.weight);
    println!("type_1:                  {}", record.type_1);
    println!("type_2:                  {}", record.type_2);
    println!("url_image:               {}", record.url_image);
    println!("generation_id:           {}", record.generation_id);
    println!("evolves_from_species_id: {}", record.evolves_from_species_id);
    Ok(())
}
