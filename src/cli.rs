//! Command-line flags and the logging set-up they drive.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};

use crate::db::{data_dir, default_db_path};

const LOG_FILE_NAME: &str = "employee-tracker.log";

#[derive(Debug, Parser)]
#[command(
    name = "employee-tracker",
    version,
    about = "Manage departments, roles and employees from the terminal"
)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// SQLite database file (default: ~/.employee-tracker/company.db)
    #[arg(long, env = "EMPLOYEE_TRACKER_DB", value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Directory holding schema.sql and seeds.sql to use instead of the
    /// bundled scripts
    #[arg(long, value_name = "DIR")]
    pub scripts: Option<PathBuf>,

    /// Drop and recreate every table, then reload the seed data
    #[arg(long)]
    pub reset: bool,

    /// Where to write logs (default: ~/.employee-tracker/employee-tracker.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Database path from the flag or environment, falling back to the home
    /// directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => default_db_path().ok_or_else(|| anyhow!("could not locate home directory")),
        }
    }

    fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => data_dir()
                .map(|dir| dir.join(LOG_FILE_NAME))
                .ok_or_else(|| anyhow!("could not locate home directory")),
        }
    }

    /// Route `tracing` output to the log file. The terminal belongs to the UI,
    /// so nothing is written to stdout or stderr.
    pub fn setup_logging(&self) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let path = self.log_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .context("failed to install log subscriber")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "employee-tracker",
            "-vv",
            "--database",
            "/tmp/company.db",
            "--reset",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.reset);
        assert_eq!(
            cli.database_path().unwrap(),
            PathBuf::from("/tmp/company.db")
        );
        assert!(cli.scripts.is_none());
    }

    #[test]
    fn explicit_log_file_wins() {
        let cli =
            Cli::try_parse_from(["employee-tracker", "--log-file", "/tmp/et.log"]).unwrap();
        assert_eq!(cli.log_path().unwrap(), PathBuf::from("/tmp/et.log"));
    }
}
