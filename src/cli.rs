//! Command-line interface for chime
//!
//! chime is a single-command binary: parsing the flags hands straight over to
//! the interactive board. Seed tasks can be placed on the board at launch with
//! repeated `--task` flags.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::role::Role;
use crate::task::{NewTask, TaskBoard};
use crate::ui;

/// chime - Countdown task board
///
/// A terminal task board for parents and kids: add tasks with a duration,
/// watch each one count down, and mark them done before the timer runs out.
#[derive(Parser, Debug)]
#[command(name = "chime")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Role to start the board in: parent or child
    #[arg(long, env = "CHIME_ROLE")]
    pub role: Option<String>,

    /// Path to a config file (defaults to ./.chime.toml)
    #[arg(long, env = "CHIME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed a task onto the board: "TITLE|DESCRIPTION|HH:MM" (repeatable)
    #[arg(short = 't', long = "task")]
    pub tasks: Vec<String>,

    /// Output errors in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = match self.config.as_deref() {
            Some(path) => Config::load(path)?,
            None => {
                let cwd = std::env::current_dir()?;
                Config::discover(&cwd)
            }
        };

        let role = match self.role.as_deref() {
            Some(value) => value.parse::<Role>()?,
            None => config.default_role,
        };

        let mut board = TaskBoard::new();
        for spec in &self.tasks {
            let input = parse_task_spec(spec)?;
            board.add(input)?;
        }

        ui::board::run(board, role, config)
    }
}

/// Parse a `--task` seed spec of the form `TITLE|DESCRIPTION|HH:MM`.
pub fn parse_task_spec(spec: &str) -> Result<NewTask> {
    let mut parts = spec.splitn(3, '|');
    let title = parts.next().unwrap_or_default();
    let description = parts.next().ok_or_else(|| {
        Error::InvalidArgument(format!(
            "invalid task spec '{spec}' (expected TITLE|DESCRIPTION|HH:MM)"
        ))
    })?;
    let duration = parts.next().ok_or_else(|| {
        Error::InvalidArgument(format!(
            "invalid task spec '{spec}' (expected TITLE|DESCRIPTION|HH:MM)"
        ))
    })?;
    NewTask::from_fields(title, description, duration)
}
