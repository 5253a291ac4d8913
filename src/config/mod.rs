pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "app-launcher")]
#[command(about = "Launch a Streamlit app on $PORT (default 8000), bound to all interfaces")]
pub struct CliConfig {
    /// Script to run, or an app name from the config file
    pub target: Option<String>,

    /// Path to a launcher TOML file (defaults to ./launcher.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Load KEY=VALUE pairs from a dotenv file before resolving the port
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = ".env")]
    pub env_file: Option<PathBuf>,

    /// Print the command line instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log the server's CPU and memory usage every N seconds
    #[arg(
        long,
        value_name = "SECONDS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "30"
    )]
    pub monitor: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["app-launcher", "quizTwo.py"]);
        assert_eq!(config.target.as_deref(), Some("quizTwo.py"));
        assert!(config.config.is_none());
        assert!(config.env_file.is_none());
        assert!(!config.dry_run);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.monitor.is_none());
    }

    #[test]
    fn test_optional_values() {
        let config = CliConfig::parse_from([
            "app-launcher",
            "--env-file",
            "--monitor",
            "--dry-run",
            "--format",
            "json",
            "quizFive.py",
        ]);
        assert_eq!(config.env_file, Some(PathBuf::from(".env")));
        assert_eq!(config.monitor, Some(30));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.target.as_deref(), Some("quizFive.py"));

        let config = CliConfig::parse_from(["app-launcher", "--monitor=5", "--env-file=prod.env"]);
        assert_eq!(config.monitor, Some(5));
        assert_eq!(config.env_file, Some(PathBuf::from("prod.env")));
        assert!(config.target.is_none());
    }

    #[test]
    fn test_bare_flags_leave_target_alone() {
        let config =
            CliConfig::try_parse_from(["app-launcher", "--monitor", "quizTwo.py"]).unwrap();
        assert_eq!(config.monitor, Some(30));
        assert_eq!(config.target.as_deref(), Some("quizTwo.py"));

        let config =
            CliConfig::try_parse_from(["app-launcher", "--env-file", "quizTwo.py"]).unwrap();
        assert_eq!(config.env_file, Some(PathBuf::from(".env")));
        assert_eq!(config.target.as_deref(), Some("quizTwo.py"));
    }
}
