#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};
#[cfg(feature = "cli")]
use std::sync::{Arc, Mutex};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub memory_usage_percent: f32,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// Samples CPU and memory of the launched server process.
#[cfg(feature = "cli")]
pub struct ProcessMonitor {
    system: Arc<Mutex<System>>,
    pid: Pid,
    start_time: Instant,
    peak_memory: Arc<Mutex<u64>>,
}

#[cfg(feature = "cli")]
impl ProcessMonitor {
    pub fn for_pid(pid: u32) -> Self {
        let pid = Pid::from_u32(pid);
        let mut system = System::new();
        refresh_one(&mut system, pid);

        Self {
            system: Arc::new(Mutex::new(system)),
            pid,
            start_time: Instant::now(),
            peak_memory: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_stats(&self) -> Option<ProcessStats> {
        let mut system = self.system.lock().ok()?;
        refresh_one(&mut system, self.pid);

        let process = system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_memory = system.total_memory() / 1024 / 1024;
        let memory_percent = if total_memory > 0 {
            (memory_mb as f32 / total_memory as f32) * 100.0
        } else {
            0.0
        };

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            memory_usage_percent: memory_percent,
            peak_memory_mb: *peak,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                pid = %self.pid,
                "server CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Uptime: {:?}",
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.memory_usage_percent,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    /// Logs totals; the process is usually gone by now so only the
    /// recorded peak is reported.
    pub fn log_final_stats(&self) {
        let peak = self.peak_memory.lock().map(|p| *p).unwrap_or(0);
        tracing::info!(
            pid = %self.pid,
            "server final stats - Uptime: {:?}, Peak Memory: {}MB",
            self.start_time.elapsed(),
            peak
        );
    }

    /// Samples every `interval` until the returned handle is aborted.
    pub fn spawn_sampler(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                self.log_stats();
            }
        })
    }
}

/// Only the watched process and host memory totals, not the whole process table.
#[cfg(feature = "cli")]
fn refresh_one(system: &mut System, pid: Pid) {
    system.refresh_memory();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
}


// No-op stand-in when built without the `cli` feature
#[cfg(not(feature = "cli"))]
pub struct ProcessMonitor;

#[cfg(not(feature = "cli"))]
impl ProcessMonitor {
    pub fn for_pid(_pid: u32) -> Self {
        Self
    }

    pub fn log_stats(&self) {}

    pub fn log_final_stats(&self) {}

    pub fn spawn_sampler(
        self: std::sync::Arc<Self>,
        _interval: std::time::Duration,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async {})
    }
}
