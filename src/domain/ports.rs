use crate::domain::model::{LaunchPlan, LaunchReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::ffi::OsString;

/// Read access to environment variables.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<OsString>;
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs the plan to completion and reports how it ended.
    async fn run(&self, plan: &LaunchPlan) -> Result<LaunchReport>;
}
