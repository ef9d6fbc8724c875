mod client;
mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "vergil2ics")]
#[command(about = "Turn your Vergil class schedule into an iCalendar file")]
struct Cli {
    /// Path to config file (defaults to ~/.config/vergil2ics/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch classes and write an .ics file
    Generate {
        #[command(flatten)]
        classes: ClassArgs,

        /// Where to write the .ics file
        #[arg(short, long)]
        output: Option<String>,

        /// IANA timezone for class times (e.g. "America/New_York")
        #[arg(long)]
        timezone: Option<String>,

        /// Calendar display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Fetch classes and print their schedules
    Show {
        #[command(flatten)]
        classes: ClassArgs,
    },
}

#[derive(Args)]
struct ClassArgs {
    /// Class identifiers (e.g. "COMS4118W001"), overriding the config file
    class_ids: Vec<String>,

    /// Term calendar code (e.g. "20253" for Fall 2025)
    #[arg(short, long)]
    term: Option<String>,
}

impl ClassArgs {
    fn apply(&self, config: &mut Config) {
        if !self.class_ids.is_empty() {
            config.class_ids = self.class_ids.clone();
        }
        if self.term.is_some() {
            config.term = self.term.clone();
        }
    }
}

impl Commands {
    /// Command-line values take precedence over the config file
    fn apply(&self, config: &mut Config) {
        match self {
            Commands::Generate {
                classes,
                output,
                timezone,
                name,
            } => {
                classes.apply(config);
                if let Some(output) = output {
                    config.output = output.clone();
                }
                if let Some(timezone) = timezone {
                    config.timezone = timezone.clone();
                }
                if name.is_some() {
                    config.calendar_name = name.clone();
                }
            }
            Commands::Show { classes } => classes.apply(config),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = run(cli).await {
        eprintln!("[-] Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;
    cli.command.apply(&mut config);

    match cli.command {
        Commands::Generate { .. } => commands::generate::run(&config).await,
        Commands::Show { .. } => commands::show::run(&config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> Config {
        Config {
            class_ids: vec!["COMS4118W001".to_string()],
            term: Some("20253".to_string()),
            output: "from-config.ics".to_string(),
            timezone: "America/New_York".to_string(),
            calendar_name: Some("From Config".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_generate_args_override_config() {
        let cli = Cli::try_parse_from([
            "vergil2ics",
            "generate",
            "ECBM4040E001",
            "ELEN6761E001",
            "--term",
            "20261",
            "--output",
            "spring.ics",
            "--timezone",
            "America/Chicago",
            "--name",
            "Spring",
        ])
        .unwrap();
        let mut config = make_config();

        cli.command.apply(&mut config);

        assert_eq!(config.class_ids, ["ECBM4040E001", "ELEN6761E001"]);
        assert_eq!(config.term.as_deref(), Some("20261"));
        assert_eq!(config.output, "spring.ics");
        assert_eq!(config.timezone, "America/Chicago");
        assert_eq!(config.calendar_name.as_deref(), Some("Spring"));
    }

    #[test]
    fn test_missing_args_keep_config_values() {
        let cli = Cli::try_parse_from(["vergil2ics", "generate"]).unwrap();
        let mut config = make_config();

        cli.command.apply(&mut config);

        assert_eq!(config.class_ids, ["COMS4118W001"]);
        assert_eq!(config.term.as_deref(), Some("20253"));
        assert_eq!(config.output, "from-config.ics");
        assert_eq!(config.timezone, "America/New_York");
        assert_eq!(config.calendar_name.as_deref(), Some("From Config"));
    }

    #[test]
    fn test_show_args_override_classes_only() {
        let cli = Cli::try_parse_from(["vergil2ics", "show", "EECS4750E001", "-t", "20261"]).unwrap();
        let mut config = make_config();

        cli.command.apply(&mut config);

        assert_eq!(config.class_ids, ["EECS4750E001"]);
        assert_eq!(config.term.as_deref(), Some("20261"));
        assert_eq!(config.output, "from-config.ics");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vergil2ics", "show", "--verbose", "--config", "x.toml"]).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));
    }
}
