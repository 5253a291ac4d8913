use app_launcher::config::env::load_env_file;
use app_launcher::utils::error::ErrorSeverity;
use app_launcher::utils::validation::{validate_required_field, Validate};
use app_launcher::utils::logger;
use app_launcher::{
    CliConfig, LaunchPlan, Launcher, OutputFormat, ProcessEnv, Result, TokioProcessRunner,
    TomlConfig,
};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let exit_code = match run(config).await {
        Ok(code) => code,
        Err(e) => {
            if e.severity() >= ErrorSeverity::High {
                tracing::error!(
                    "launch failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
            }
            eprintln!("{}", e.user_friendly_message());
            eprintln!("hint: {}", e.recovery_suggestion());
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run(config: CliConfig) -> Result<i32> {
    if let Some(path) = &config.env_file {
        load_env_file(path)?;
    }

    let file_config = TomlConfig::load(config.config.as_deref())?;
    file_config.validate()?;

    let requested = config.target.clone().or_else(|| file_config.default_app.clone());
    let name = validate_required_field("target", &requested)?;
    let target = file_config.resolve_target(name);

    let runner = match config.monitor {
        Some(seconds) => TokioProcessRunner::with_monitoring(Duration::from_secs(seconds.max(1))),
        None => TokioProcessRunner::new(),
    };
    let launcher = Launcher::with_settings(runner, file_config.server.clone());
    let plan = launcher.plan(target, &ProcessEnv);

    if config.dry_run {
        tracing::info!("dry run, not starting the server");
        print_plan(&plan, config.format)?;
        return Ok(0);
    }

    let report = launcher.launch(&plan).await?;
    Ok(report.exit_code)
}

fn print_plan(plan: &LaunchPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", plan.command_line()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan.summary())?),
    }
    Ok(())
}
