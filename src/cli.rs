use std::path::{Path, PathBuf};

mod breadth;
mod check;
mod depth;
mod majors;
mod terminal;

use breadth::Breadth;
use check::Check;
use clap::ArgAction;
use depth::Depth;
use magna::{CourseCode, domain::Config};
use majors::Majors;

/// Parse a free-text, comma-separated course list.
///
/// This is a CLI boundary function: entries are trimmed and uppercased
/// before strict parsing, matching the normalization the engine assumes
/// has already happened.
fn parse_course_list(input: &str) -> anyhow::Result<Vec<CourseCode>> {
    let mut courses = Vec::new();
    let mut invalid = Vec::new();

    for entry in input.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.to_uppercase().parse() {
            Ok(code) => courses.push(code),
            Err(_) => invalid.push(entry.to_string()),
        }
    }

    if !invalid.is_empty() {
        anyhow::bail!("invalid course codes: {}", invalid.join(", "));
    }
    Ok(courses)
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The root of the audit data directory
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Path to a configuration file (defaults to ./audit.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;
        let root = self
            .root
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        self.command.run(root, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path).map_err(|e| anyhow::anyhow!(e));
    }

    let default = Path::new("audit.toml");
    if default.exists() {
        return Config::load(default).map_err(|e| anyhow::anyhow!(e));
    }

    Ok(Config::default())
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Check a course list against a major's requirements
    Check(Check),

    /// Classify a course list into breadth categories
    Breadth(Breadth),

    /// Check a course list for subject concentration (depth)
    Depth(Depth),

    /// List the majors with a loaded rule document
    Majors(Majors),
}

impl Command {
    fn run(self, root: PathBuf, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Check(command) => command.run(root, config)?,
            Self::Breadth(command) => command.run(root)?,
            Self::Depth(command) => command.run(root)?,
            Self::Majors(command) => command.run(root)?,
        }
        Ok(())
    }
}
