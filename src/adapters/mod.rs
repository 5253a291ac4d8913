// Adapters layer: concrete implementations for external systems (processes, environment).

pub mod process;

pub use crate::config::env::{MapEnv, ProcessEnv};
pub use process::{RecordingRunner, TokioProcessRunner};
