use clap::{Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, time::Duration};

use crate::{
    generator::{FanOutPolicy, GeneratorConfig, DEFAULT_BATCH_SIZE, DEFAULT_RECORD_COUNT},
    report::{View, DEFAULT_LIMIT},
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Seed the BlockbusterBase movie database and chart what is in it"
)]
pub struct Cli {
    #[arg(global = true, short, long, help = "Show debug messages")]
    pub verbose: bool,

    #[arg(
        global = true,
        short = 'u',
        long,
        env = "DATABASE_URL",
        help = "Database URL, takes precedence over the secrets file"
    )]
    pub database_url: Option<String>,

    #[arg(
        global = true,
        long,
        env = "BLOCKBUSTER_SECRETS",
        long_help = "TOML file with a [postgres] table\n \
                    - Keys: host, port (default 5432), database, user, password.\n \
                    - Only read when no database URL is given."
    )]
    pub secrets: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, PartialEq, Eq, Debug)]
pub enum Commands {
    #[command(about = "Create every table that does not exist yet")]
    Schema,

    #[command(about = "Fill the database with synthetic movies and everything around them")]
    Seed {
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_RECORD_COUNT,
            help = "Rows per independent entity (studios, directors, actors, movies)"
        )]
        records: usize,

        #[arg(long, help = "Seed the random generator for a reproducible run")]
        seed: Option<u64>,

        #[arg(
            long,
            value_enum,
            default_value_t = FanOutPolicy::Lenient,
            help = "How many-to-many links are drawn"
        )]
        fan_out: FanOutPolicy,

        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, help = "Rows per INSERT statement")]
        batch_size: usize,

        #[arg(long, help = "Create missing tables before seeding")]
        create_schema: bool,
    },

    #[command(about = "Render the analytics dashboard")]
    Dashboard {
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_LIMIT,
            help = "Rows shown by the top-N views"
        )]
        limit: u64,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(
            long,
            value_name = "SECONDS",
            default_value_t = DEFAULT_REFRESH_SECS,
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Re-render on this interval until interrupted"
        )]
        refresh: u64,

        #[arg(long, help = "Render every view once and exit")]
        once: bool,

        #[arg(
            long = "view",
            value_enum,
            help = "Only render these views, may be repeated (default: all)"
        )]
        views: Vec<View>,
    },
}

pub const DEFAULT_REFRESH_SECS: u64 = 60;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bar charts drawn with block characters
    #[default]
    Text,
    /// One JSON object per view, newline separated
    Json,
}

impl Commands {
    /// Generator settings for a `seed` invocation.
    pub fn generator_config(&self) -> Option<GeneratorConfig> {
        match *self {
            Commands::Seed {
                records,
                seed,
                fan_out,
                batch_size,
                ..
            } => Some(GeneratorConfig {
                record_count: records,
                seed,
                fan_out,
                batch_size,
            }),
            _ => None,
        }
    }

    /// Pause between dashboard renders, `None` for a single pass.
    pub fn refresh_interval(&self) -> Option<Duration> {
        match *self {
            Commands::Dashboard {
                refresh,
                once: false,
                ..
            } => Some(Duration::from_secs(refresh)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_defaults() {
        let cli = Cli::try_parse_from(["blockbuster", "seed"]).unwrap();
        assert_eq!(
            cli.command.generator_config(),
            Some(GeneratorConfig::default())
        );
    }

    #[test]
    fn seed_flags() {
        let cli = Cli::try_parse_from([
            "blockbuster",
            "seed",
            "--records",
            "50",
            "--seed",
            "7",
            "--fan-out",
            "exact",
            "--batch-size",
            "20",
            "--create-schema",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Seed {
                records: 50,
                seed: Some(7),
                fan_out: FanOutPolicy::Exact,
                batch_size: 20,
                create_schema: true,
            }
        );
    }

    #[test]
    fn dashboard_flags() {
        let cli = Cli::try_parse_from([
            "blockbuster",
            "-v",
            "dashboard",
            "--format",
            "json",
            "--view",
            "top-studios",
            "--view",
            "releases-per-year",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Dashboard {
                limit: DEFAULT_LIMIT,
                format: OutputFormat::Json,
                refresh: DEFAULT_REFRESH_SECS,
                once: false,
                views: vec![View::TopStudios, View::ReleasesPerYear],
            }
        );
        assert_eq!(cli.command.generator_config(), None);
        assert_eq!(
            cli.command.refresh_interval(),
            Some(Duration::from_secs(DEFAULT_REFRESH_SECS))
        );
    }

    #[test]
    fn dashboard_once_renders_a_single_pass() {
        let cli = Cli::try_parse_from(["blockbuster", "dashboard", "--once"]).unwrap();
        assert_eq!(cli.command.refresh_interval(), None);

        let cli = Cli::try_parse_from(["blockbuster", "dashboard", "--refresh", "5"]).unwrap();
        assert_eq!(cli.command.refresh_interval(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_refresh_is_rejected() {
        let err = Cli::try_parse_from(["blockbuster", "dashboard", "--refresh", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
