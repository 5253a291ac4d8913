//! Process runners.
//!
//! `TokioProcessRunner` spawns the server as a child sharing the launcher's
//! terminal and waits for it. `RecordingRunner` records plans instead of
//! spawning anything and is used by tests.

use crate::domain::model::{LaunchPlan, LaunchReport};
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{LaunchError, Result};
use crate::utils::monitor::ProcessMonitor;
use async_trait::async_trait;
use chrono::Utc;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};

#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    monitor_interval: Option<Duration>,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the child's resource usage every `interval` while it runs.
    pub fn with_monitoring(interval: Duration) -> Self {
        Self {
            monitor_interval: Some(interval),
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, plan: &LaunchPlan) -> Result<LaunchReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        // Listen before spawning so a stop request cannot slip in between.
        let mut interrupt = SignalListener::interrupt();
        let mut terminate = SignalListener::terminate();

        let mut child = Command::new(&plan.program)
            .args(plan.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::SpawnError {
                program: plan.program.clone(),
                source,
            })?;

        tracing::debug!(pid = ?child.id(), "server process started");

        let sampler = match (self.monitor_interval, child.id()) {
            (Some(interval), Some(pid)) => {
                let monitor = Arc::new(ProcessMonitor::for_pid(pid));
                let handle = Arc::clone(&monitor).spawn_sampler(interval);
                Some((monitor, handle))
            }
            _ => None,
        };

        let status = wait_through_signals(&mut child, &mut interrupt, &mut terminate).await;

        if let Some((monitor, handle)) = sampler {
            handle.abort();
            monitor.log_final_stats();
        }

        let (exit_code, signal) = exit_code_of(status?);
        Ok(LaunchReport {
            exit_code,
            signal,
            started_at,
            elapsed: start.elapsed(),
        })
    }
}

/// A stop signal aimed at the launcher. A listener that could not be
/// registered never fires; the launcher then just waits for the server.
pub struct SignalListener {
    #[cfg(unix)]
    inner: Option<tokio::signal::unix::Signal>,
    #[cfg(not(unix))]
    ctrl_c: bool,
}

impl SignalListener {
    #[cfg(unix)]
    fn register(kind: tokio::signal::unix::SignalKind, name: &str) -> Self {
        let inner = match tokio::signal::unix::signal(kind) {
            Ok(signal) => Some(signal),
            Err(e) => {
                tracing::warn!("cannot listen for {}: {}", name, e);
                None
            }
        };
        Self { inner }
    }

    #[cfg(unix)]
    pub fn interrupt() -> Self {
        Self::register(tokio::signal::unix::SignalKind::interrupt(), "SIGINT")
    }

    #[cfg(unix)]
    pub fn terminate() -> Self {
        Self::register(tokio::signal::unix::SignalKind::terminate(), "SIGTERM")
    }

    #[cfg(unix)]
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    #[cfg(not(unix))]
    pub fn interrupt() -> Self {
        Self { ctrl_c: true }
    }

    #[cfg(not(unix))]
    pub fn terminate() -> Self {
        Self::disabled()
    }

    #[cfg(not(unix))]
    pub fn disabled() -> Self {
        Self { ctrl_c: false }
    }

    /// Resolves on each delivery; pending forever without a listener.
    pub async fn recv(&mut self) {
        #[cfg(unix)]
        if let Some(signal) = self.inner.as_mut() {
            if signal.recv().await.is_some() {
                return;
            }
        }

        #[cfg(not(unix))]
        if self.ctrl_c {
            match tokio::signal::ctrl_c().await {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!("cannot listen for Ctrl-C: {}", e);
                    self.ctrl_c = false;
                }
            }
        }

        std::future::pending::<()>().await
    }
}

/// Waits for the server, relaying stop requests to it.
///
/// The child gets terminal interrupts on its own, so the first Ctrl-C only
/// keeps us alive long enough to relay its exit status. SIGTERM is not
/// shared that way and is forwarded. Any repeat kills the server.
async fn wait_through_signals(
    child: &mut Child,
    interrupt: &mut SignalListener,
    terminate: &mut SignalListener,
) -> Result<ExitStatus> {
    let mut stop_requests = 0u32;
    loop {
        tokio::select! {
            status = child.wait() => return Ok(status?),
            _ = interrupt.recv() => {
                stop_requests += 1;
                if stop_requests == 1 {
                    tracing::debug!("interrupt received, waiting for the server to shut down");
                } else {
                    kill_server(child);
                }
            }
            _ = terminate.recv() => {
                stop_requests += 1;
                if stop_requests == 1 {
                    tracing::debug!("SIGTERM received, forwarding to the server");
                    forward_terminate(child);
                } else {
                    kill_server(child);
                }
            }
        }
    }
}

fn kill_server(child: &mut Child) {
    tracing::warn!("repeated stop request, killing the server");
    if let Err(e) = child.start_kill() {
        tracing::warn!("failed to kill the server: {}", e);
    }
}

fn forward_terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            tracing::warn!(pid, "failed to forward SIGTERM: {}", e);
        }
        return;
    }

    if let Err(e) = child.start_kill() {
        tracing::warn!("failed to stop the server: {}", e);
    }
}

/// Shell convention: a child killed by signal `n` reports `128 + n`.
pub fn exit_code_of(status: ExitStatus) -> (i32, Option<i32>) {
    if let Some(code) = status.code() {
        return (code, None);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return (128 + signal, Some(signal));
        }
    }

    (1, None)
}

/// Records every plan it is asked to run and answers with queued exit codes
/// (0 once the queue is empty).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    plans: Mutex<Vec<LaunchPlan>>,
    exit_codes: Mutex<Vec<i32>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_codes(exit_codes: Vec<i32>) -> Self {
        let mut reversed = exit_codes;
        reversed.reverse();
        Self {
            plans: Mutex::new(Vec::new()),
            exit_codes: Mutex::new(reversed),
        }
    }

    pub fn recorded_plans(&self) -> Vec<LaunchPlan> {
        lock(&self.plans).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, plan: &LaunchPlan) -> Result<LaunchReport> {
        lock(&self.plans).push(plan.clone());
        let exit_code = lock(&self.exit_codes).pop().unwrap_or(0);
        Ok(LaunchReport {
            exit_code,
            signal: None,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        })
    }
}
