use crate::domain::model::ServerSettings;
use crate::utils::error::{LaunchError, Result};
use crate::utils::validation::{
    validate_env_var_name, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_CONFIG_FILE: &str = "launcher.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// App launched when no target is given on the command line.
    pub default_app: Option<String>,
    #[serde(default)]
    pub server: ServerSettings,
    /// App name -> script path.
    #[serde(default)]
    pub apps: BTreeMap<String, String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LaunchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LaunchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `path`, or `launcher.toml` in the working directory when it
    /// exists, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("using {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${STREAMLIT_BIN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Maps an app name to its script; anything else is taken as a path.
    pub fn resolve_target<'a>(&'a self, name: &'a str) -> &'a str {
        self.apps.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.command", &self.server.command)?;
        validate_non_empty_string("server.subcommand", &self.server.subcommand)?;
        validate_non_empty_string("server.address", &self.server.address)?;
        validate_non_empty_string("server.default_port", &self.server.default_port)?;
        validate_env_var_name("server.port_env", &self.server.port_env)?;

        for (name, script) in &self.apps {
            validate_path(&format!("apps.{}", name), script)?;
        }

        if let Some(default_app) = &self.default_app {
            validate_non_empty_string("default_app", default_app)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
