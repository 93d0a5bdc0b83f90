use super::AsyncExecutor;
use crate::application::dto::{ExportFile, ModuleRefreshReport};
use crate::domain::entities::WidgetLayout;
use crate::domain::errors::ApiError;
use crate::domain::services::ChartSpec;
use crate::presentation::components::CascadeRequest;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Result of a background task, applied on the UI thread.
pub enum TaskOutcome {
    Locations {
        request: CascadeRequest,
        result: Result<Vec<String>, ApiError>,
    },
    ModuleRefreshed(ModuleRefreshReport),
    ChartReloaded {
        spec: &'static ChartSpec,
        data: Option<Value>,
    },
    WidgetsLoaded(Result<WidgetLayout, ApiError>),
    WidgetsSaved(Result<WidgetLayout, ApiError>),
    WidgetsReset(Result<WidgetLayout, ApiError>),
    ExportFinished(Result<ExportFile, ApiError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Locations,
    Refresh,
    ChartReload,
    WidgetLoad,
    WidgetSave,
    WidgetReset,
    Export,
}

impl TaskOutcome {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskOutcome::Locations { .. } => TaskKind::Locations,
            TaskOutcome::ModuleRefreshed(_) => TaskKind::Refresh,
            TaskOutcome::ChartReloaded { .. } => TaskKind::ChartReload,
            TaskOutcome::WidgetsLoaded(_) => TaskKind::WidgetLoad,
            TaskOutcome::WidgetsSaved(_) => TaskKind::WidgetSave,
            TaskOutcome::WidgetsReset(_) => TaskKind::WidgetReset,
            TaskOutcome::ExportFinished(_) => TaskKind::Export,
        }
    }
}

/// Runs futures on the executor and hands their outcomes back through a
/// channel that the UI drains once per frame.
pub struct AsyncTaskManager {
    executor: AsyncExecutor,
    sender: Sender<TaskOutcome>,
    receiver: Receiver<TaskOutcome>,
    pending: HashMap<TaskKind, usize>,
}

impl AsyncTaskManager {
    pub fn new(executor: AsyncExecutor) -> Self {
        let (sender, receiver) = channel();
        Self {
            executor,
            sender,
            receiver,
            pending: HashMap::new(),
        }
    }

    pub fn spawn<F>(&mut self, kind: TaskKind, future: F)
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        *self.pending.entry(kind).or_insert(0) += 1;
        let sender = self.sender.clone();
        self.executor.spawn(async move {
            let outcome = future.await;
            if sender.send(outcome).is_err() {
                tracing::debug!("UI closed before {:?} task finished", kind);
            }
        });
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.get(&kind).copied().unwrap_or(0) > 0
    }

    pub fn has_pending(&self) -> bool {
        self.pending.values().any(|count| *count > 0)
    }

    /// Every outcome that arrived since the last poll, in arrival order.
    pub fn poll(&mut self) -> Vec<TaskOutcome> {
        let mut finished = Vec::new();
        while let Ok(outcome) = self.receiver.try_recv() {
            if let Some(count) = self.pending.get_mut(&outcome.kind()) {
                *count = count.saturating_sub(1);
            }
            finished.push(outcome);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LocationLevel, LocationScope};
    use std::time::{Duration, Instant};

    fn poll_until_idle(manager: &mut AsyncTaskManager) -> Vec<TaskOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut outcomes = Vec::new();
        while manager.has_pending() && Instant::now() < deadline {
            outcomes.extend(manager.poll());
            std::thread::sleep(Duration::from_millis(5));
        }
        outcomes
    }

    #[test]
    fn outcomes_arrive_through_poll_and_clear_pending() {
        let mut manager = AsyncTaskManager::new(AsyncExecutor::new().unwrap());
        let request = CascadeRequest {
            scope: LocationScope::Employer,
            level: LocationLevel::Province,
            parent: None,
            seq: 7,
        };

        let sent = request.clone();
        manager.spawn(TaskKind::Locations, async move {
            TaskOutcome::Locations {
                request: sent,
                result: Ok(vec!["Cavite".to_string()]),
            }
        });
        manager.spawn(TaskKind::WidgetLoad, async {
            TaskOutcome::WidgetsLoaded(Ok(WidgetLayout::default()))
        });
        assert!(manager.is_pending(TaskKind::Locations));

        let outcomes = poll_until_idle(&mut manager);
        assert_eq!(outcomes.len(), 2);
        assert!(!manager.has_pending());
        assert!(outcomes.iter().any(|outcome| matches!(
            outcome,
            TaskOutcome::Locations { request: r, .. } if *r == request
        )));
    }
}
