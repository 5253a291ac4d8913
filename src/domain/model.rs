use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::time::Duration;

/// Port token handed to the server. Never parsed: whatever the environment
/// held is what the server receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port(OsString);

impl Port {
    pub fn new(value: impl Into<OsString>) -> Self {
        Self(value.into())
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

/// Server command line settings shared by every launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub command: String,
    pub subcommand: String,
    pub address: String,
    pub default_port: String,
    pub port_env: String,
}

pub const DEFAULT_SERVER_COMMAND: &str = "streamlit";
pub const DEFAULT_SUBCOMMAND: &str = "run";
pub const WILDCARD_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8000";
pub const PORT_ENV_VAR: &str = "PORT";

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_SERVER_COMMAND.to_string(),
            subcommand: DEFAULT_SUBCOMMAND.to_string(),
            address: WILDCARD_ADDRESS.to_string(),
            default_port: DEFAULT_PORT.to_string(),
            port_env: PORT_ENV_VAR.to_string(),
        }
    }
}

/// A fully resolved server invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub subcommand: String,
    pub target: String,
    pub port: Port,
    pub address: String,
}

impl LaunchPlan {
    /// `<subcommand> <target> --server.port <port> --server.address <address>`
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from(&self.subcommand),
            OsString::from(&self.target),
            OsString::from("--server.port"),
            self.port.as_os_str().to_os_string(),
            OsString::from("--server.address"),
            OsString::from(&self.address),
        ]
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            program: self.program.clone(),
            args: self
                .args()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Shell-style rendering for logs and dry runs.
    pub fn command_line(&self) -> String {
        let summary = self.summary();
        std::iter::once(summary.program.as_str())
            .chain(summary.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub program: String,
    pub args: Vec<String>,
}

/// How the server process ended.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchReport {
    pub exit_code: i32,
    pub signal: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(port: &str) -> LaunchPlan {
        LaunchPlan {
            program: "streamlit".to_string(),
            subcommand: "run".to_string(),
            target: "quizTwo.py".to_string(),
            port: Port::new(port),
            address: WILDCARD_ADDRESS.to_string(),
        }
    }

    #[test]
    fn test_args_shape() {
        let args = plan("8000").args();
        let expected: Vec<OsString> = [
            "run",
            "quizTwo.py",
            "--server.port",
            "8000",
            "--server.address",
            "0.0.0.0",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_command_line_quotes_odd_ports() {
        assert_eq!(
            plan("8000").command_line(),
            "streamlit run quizTwo.py --server.port 8000 --server.address 0.0.0.0"
        );
        assert_eq!(
            plan(" 80 80").command_line(),
            "streamlit run quizTwo.py --server.port ' 80 80' --server.address 0.0.0.0"
        );
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_value(plan("9090").summary()).unwrap();
        assert_eq!(json["program"], "streamlit");
        assert_eq!(json["args"][3], "9090");
    }
}
