pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{MapEnv, ProcessEnv, RecordingRunner, TokioProcessRunner};
pub use config::toml_config::TomlConfig;
pub use crate::core::{launcher::Launcher, resolver::resolve_port};
pub use domain::model::{LaunchPlan, LaunchReport, Port, ServerSettings};
pub use utils::error::{LaunchError, Result};
