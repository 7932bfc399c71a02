//! Binary entry point: parse flags, open the store, make sure the tables
//! exist, then hand the connection to the terminal menu until the user exits.
use clap::Parser;
use employee_tracker::{ensure_schema, open_store, run_app, App, Cli, Scripts};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.setup_logging()?;

    let db_path = cli.database_path()?;
    let conn = open_store(&db_path)?;
    info!(path = %db_path.display(), "database opened");

    // A failed initialization is reported in the UI; the menu still starts.
    let startup = match &cli.scripts {
        Some(dir) => Scripts::from_dir(dir),
        None => Ok(Scripts::bundled()),
    }
    .and_then(|scripts| ensure_schema(&conn, &scripts, cli.reset));

    let mut app = App::new(conn);
    match startup {
        Ok(true) => app.show_info("Database initialized successfully."),
        Ok(false) => {}
        Err(err) => {
            error!(%err, "database initialization failed");
            app.show_error(format!("Database initialization failed: {err}"));
        }
    }

    run_app(&mut app)
}
