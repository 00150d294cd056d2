use std::{env, fs, path::PathBuf};

use metaquery::{logging::init_tracing, BuilderSession, Catalog, Event, MetaqueryConfig};

fn usage() {
    eprintln!("Usage: print_sql [catalog_dir_or_json] <events_json>");
    eprintln!("Without a catalog argument, [catalog] dir from metaquery.toml is used.");
    eprintln!("Example: cargo run --example print_sql -- examples/catalog examples/events/adult_users.json");
}

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let config = MetaqueryConfig::load_default();
    init_tracing(&config.logging);

    let (catalog_path, events_path) = match (args.len(), config.catalog.dir.clone()) {
        (2.., _) => (PathBuf::from(args.remove(0)), PathBuf::from(args.remove(0))),
        (1, Some(dir)) => (dir, PathBuf::from(args.remove(0))),
        _ => {
            usage();
            std::process::exit(1);
        }
    };

    let catalog = if catalog_path.is_dir() {
        Catalog::load_from_dir(&catalog_path)?
    } else {
        Catalog::from_json(&fs::read_to_string(&catalog_path)?)?
    };
    let events: Vec<Event> = serde_json::from_str(&fs::read_to_string(events_path)?)?;

    let mut session = BuilderSession::new(catalog);
    for event in events {
        if let Some(update) = session.dispatch(event) {
            tracing::info!(database = ?update.database_name, "sql updated");
        }
    }

    if let Some(database) = session.database_name() {
        eprintln!("-- database: {database}");
    }
    println!("{}", session.sql());
    Ok(())
}
