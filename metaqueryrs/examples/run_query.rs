//! Register a PostgreSQL database, pick a table and run the resulting query.
//!
//! Usage: run_query <dsn> <table> [column...]

use std::env;

use metaquery::{
    backends::PostgresBackend,
    logging::init_tracing,
    runtime::{refresh_catalog, register_database, run_current_query},
    BuilderSession, Catalog, Column, Event, MetaqueryConfig, Table,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 2 {
        eprintln!("Usage: run_query <dsn> <table> [column...]");
        std::process::exit(1);
    }
    let dsn = args.remove(0);
    let table_name = args.remove(0);

    let config = MetaqueryConfig::load_default();
    init_tracing(&config.logging);

    let backend = PostgresBackend::from_config(&config).await?;
    let mut session = BuilderSession::new(Catalog::empty());
    refresh_catalog(&mut session, &backend).await?;
    let info = register_database(&mut session, &backend, &backend, &dsn).await?;
    println!("registered {} at {}", info.name, info.address);

    let table = Table::new(info.name.clone(), table_name);
    session.dispatch(Event::select_table(Some(table.clone())));
    if session.state().selected_table() != Some(&table) {
        anyhow::bail!("table {table} not found in {}", info.name);
    }
    for column in args {
        let column = Column::new(table.database_name.clone(), table.table_name.clone(), column);
        session.dispatch(Event::add_column(column));
    }

    println!("{}\n", session.sql());
    let result = run_current_query(&session, &backend, &backend, &config.query).await?;
    println!("{}", serde_json::to_string_pretty(&result.rows)?);
    Ok(())
}
