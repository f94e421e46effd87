use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::application::short_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Info,
    Success,
    Action,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLog {
    pub id: String,
    /// Wall-clock time of day, `HH:MM:SS`.
    pub timestamp: String,
    pub message: String,
    pub kind: LogKind,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsoleView {
    pub running: bool,
    pub active_job_id: Option<String>,
    pub logs: Vec<AgentLog>,
}

#[derive(Default)]
struct ConsoleState {
    logs: Vec<AgentLog>,
    active_job_id: Option<String>,
}

/// Append-only log stream plus the running flag of the agent.
///
/// Kept apart from the `Store` so it can be polled while a pass is writing
/// applications. Critical sections never span an `.await`.
#[derive(Default)]
pub struct AgentConsole {
    running: AtomicBool,
    state: Mutex<ConsoleState>,
}

impl AgentConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Claims the running flag and clears the previous run's logs.
    /// Returns `None` when a pass is already active.
    pub fn try_begin(self: &Arc<Self>) -> Option<RunGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        let mut state = self.state();
        state.logs.clear();
        state.active_job_id = None;
        Some(RunGuard {
            console: Arc::clone(self),
        })
    }

    pub fn push(&self, message: impl Into<String>, kind: LogKind) {
        let message = message.into();
        debug!(?kind, "agent: {message}");
        self.state().logs.push(AgentLog {
            id: short_id(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            message,
            kind,
        });
    }

    pub fn set_active_job(&self, job_id: Option<String>) {
        self.state().active_job_id = job_id;
    }

    pub fn active_job_id(&self) -> Option<String> {
        self.state().active_job_id.clone()
    }

    pub fn logs(&self) -> Vec<AgentLog> {
        self.state().logs.clone()
    }

    pub fn view(&self) -> ConsoleView {
        let state = self.state();
        ConsoleView {
            running: self.is_running(),
            active_job_id: state.active_job_id.clone(),
            logs: state.logs.clone(),
        }
    }
}

/// Proof that the holder owns the single agent slot. Dropping it releases the
/// flag and clears the active job, even if the pass panicked.
pub struct RunGuard {
    console: Arc<AgentConsole>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.console.state().active_job_id = None;
        self.console.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_guard_at_a_time() {
        let console = Arc::new(AgentConsole::new());
        let guard = console.try_begin().unwrap();
        assert!(console.is_running());
        assert!(console.try_begin().is_none());
        drop(guard);
        assert!(!console.is_running());
        assert!(console.try_begin().is_some());
    }

    #[test]
    fn test_begin_clears_previous_logs() {
        let console = Arc::new(AgentConsole::new());
        console.push("old", LogKind::Info);
        let _guard = console.try_begin().unwrap();
        assert!(console.logs().is_empty());
    }

    #[test]
    fn test_drop_clears_active_job() {
        let console = Arc::new(AgentConsole::new());
        let guard = console.try_begin().unwrap();
        console.set_active_job(Some("3".to_string()));
        assert_eq!(console.view().active_job_id.as_deref(), Some("3"));
        drop(guard);
        assert!(console.active_job_id().is_none());
    }

    #[test]
    fn test_log_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(LogKind::Warning).unwrap(),
            serde_json::json!("warning")
        );
    }
}
