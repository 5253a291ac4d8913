use crate::core::resolver::resolve_port;
use crate::domain::model::{LaunchPlan, LaunchReport, ServerSettings};
use crate::domain::ports::{EnvSource, ProcessRunner};
use crate::utils::error::Result;

pub struct Launcher<R: ProcessRunner> {
    runner: R,
    settings: ServerSettings,
}

impl<R: ProcessRunner> Launcher<R> {
    pub fn new(runner: R) -> Self {
        Self::with_settings(runner, ServerSettings::default())
    }

    pub fn with_settings(runner: R, settings: ServerSettings) -> Self {
        Self { runner, settings }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Resolves the port once and fixes the invocation for `target`.
    pub fn plan(&self, target: &str, env: &dyn EnvSource) -> LaunchPlan {
        let port = resolve_port(env, &self.settings.port_env, &self.settings.default_port);
        tracing::debug!(
            var = %self.settings.port_env,
            port = %port,
            "resolved server port"
        );

        LaunchPlan {
            program: self.settings.command.clone(),
            subcommand: self.settings.subcommand.clone(),
            target: target.to_string(),
            port,
            address: self.settings.address.clone(),
        }
    }

    pub async fn launch(&self, plan: &LaunchPlan) -> Result<LaunchReport> {
        tracing::info!("launching: {}", plan.command_line());

        let report = self.runner.run(plan).await?;

        tracing::info!(
            exit_code = report.exit_code,
            signal = ?report.signal,
            started_at = %report.started_at.to_rfc3339(),
            "server exited after {:?}",
            report.elapsed
        );
        Ok(report)
    }

    pub async fn plan_and_launch(&self, target: &str, env: &dyn EnvSource) -> Result<LaunchReport> {
        let plan = self.plan(target, env);
        self.launch(&plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::process::RecordingRunner;
    use crate::config::env::MapEnv;

    #[test]
    fn test_plan_uses_settings() {
        let settings = ServerSettings {
            command: "python".to_string(),
            subcommand: "-m".to_string(),
            address: "127.0.0.1".to_string(),
            default_port: "8501".to_string(),
            port_env: "APP_PORT".to_string(),
        };
        let launcher = Launcher::with_settings(RecordingRunner::new(), settings);
        let plan = launcher.plan("app.py", &MapEnv::from_pairs([("PORT", "1")]));

        assert_eq!(plan.program, "python");
        assert_eq!(plan.subcommand, "-m");
        assert_eq!(plan.address, "127.0.0.1");
        assert_eq!(plan.port.to_string(), "8501");
    }

    #[tokio::test]
    async fn test_launch_hands_plan_to_runner() {
        let launcher = Launcher::new(RecordingRunner::with_exit_codes(vec![3]));
        let report = launcher
            .plan_and_launch("quizFive.py", &MapEnv::from_pairs([("PORT", "9090")]))
            .await
            .unwrap();

        assert_eq!(report.exit_code, 3);
        let plans = launcher.runner().recorded_plans();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].target, "quizFive.py");
        assert_eq!(plans[0].port.to_string(), "9090");
    }
}
