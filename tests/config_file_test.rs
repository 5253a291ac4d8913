use anyhow::Result;
use app_launcher::utils::validation::Validate;
use app_launcher::{Launcher, MapEnv, RecordingRunner, TomlConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_file_drives_launch_plan() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
default_app = "quiz"

[server]
command = "/opt/venv/bin/streamlit"
default_port = "8501"
port_env = "APP_PORT"

[apps]
quiz = "quizTwo.py"
"#
    )?;

    let config = TomlConfig::load(Some(file.path()))?;
    config.validate()?;

    let name = config.default_app.as_deref().unwrap_or_default();
    let launcher = Launcher::with_settings(RecordingRunner::new(), config.server.clone());

    let plan = launcher.plan(config.resolve_target(name), &MapEnv::default());
    assert_eq!(
        plan.command_line(),
        "/opt/venv/bin/streamlit run quizTwo.py --server.port 8501 --server.address 0.0.0.0"
    );

    // PORT is ignored once port_env points elsewhere
    let env = MapEnv::from_pairs([("PORT", "1"), ("APP_PORT", "7000")]);
    let plan = launcher.plan(config.resolve_target(name), &env);
    assert_eq!(plan.port.to_string(), "7000");
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> Result<()> {
    let config = TomlConfig::from_toml_str("[server]\ncommand = \"\"\n")?;
    let err = config.validate().unwrap_err();
    assert_eq!(err.exit_code(), 2);
    Ok(())
}
