pub mod launcher;
pub mod resolver;

pub use crate::domain::model::{LaunchPlan, LaunchReport, Port, ServerSettings};
pub use crate::domain::ports::{EnvSource, ProcessRunner};
pub use crate::utils::error::Result;
