use crate::domain::ports::EnvSource;
use crate::utils::error::{LaunchError, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// In-memory environment for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<OsString, OsString>,
}

impl MapEnv {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self::from_os_pairs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())))
    }

    pub fn from_os_pairs(pairs: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self {
            vars: pairs.into_iter().collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        self.vars.get(&OsString::from(name)).cloned()
    }
}

/// Loads `KEY=VALUE` lines into the process environment. Variables that are
/// already set keep their value.
pub fn load_env_file(path: &Path) -> Result<PathBuf> {
    dotenvy::from_path(path).map_err(|e| LaunchError::EnvFileError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!("loaded environment from {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_map_env_lookup() {
        let env = MapEnv::from_pairs([("PORT", "9090")]);
        assert_eq!(env.var("PORT"), Some(OsString::from("9090")));
        assert_eq!(env.var("HOME"), None);
    }

    #[test]
    fn test_load_env_file_does_not_override() {
        std::env::set_var("APP_LAUNCHER_TEST_KEEP", "from-shell");
        std::env::remove_var("APP_LAUNCHER_TEST_NEW");

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "APP_LAUNCHER_TEST_KEEP=from-file").unwrap();
        writeln!(file, "APP_LAUNCHER_TEST_NEW=loaded").unwrap();

        load_env_file(file.path()).unwrap();

        assert_eq!(
            ProcessEnv.var("APP_LAUNCHER_TEST_KEEP"),
            Some(OsString::from("from-shell"))
        );
        assert_eq!(
            ProcessEnv.var("APP_LAUNCHER_TEST_NEW"),
            Some(OsString::from("loaded"))
        );

        std::env::remove_var("APP_LAUNCHER_TEST_KEEP");
        std::env::remove_var("APP_LAUNCHER_TEST_NEW");
    }

    #[test]
    fn test_missing_env_file_is_config_error() {
        let err = load_env_file(Path::new("/nonexistent/app-launcher/.env")).unwrap_err();
        assert!(matches!(err, LaunchError::EnvFileError { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
