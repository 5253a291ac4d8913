//! Fixed entry points: one binary per target script, no runtime options.
//!
//! These never read a config file, so the server command, address and
//! default port are always the built-in ones.

use crate::adapters::process::TokioProcessRunner;
use crate::config::env::ProcessEnv;
use crate::core::launcher::Launcher;
use crate::utils::logger;

pub const ASSIGNMENT_FIVE: &str = "assignmentFive.py";
pub const QUIZ_FIVE: &str = "quizFive.py";
pub const QUIZ_TWO: &str = "quizTwo.py";

/// Launches `target` and returns the exit code this process should end with.
pub async fn run_fixed_target(target: &'static str) -> i32 {
    logger::init_cli_logger(false);

    let launcher = Launcher::new(TokioProcessRunner::new());
    match launcher.plan_and_launch(target, &ProcessEnv).await {
        Ok(report) => report.exit_code,
        Err(e) => {
            tracing::debug!(category = ?e.category(), "launch failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            e.exit_code()
        }
    }
}
