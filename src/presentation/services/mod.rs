pub mod async_executor;
mod async_task_manager;
pub mod log_capture;

pub use async_executor::AsyncExecutor;
pub use async_task_manager::{AsyncTaskManager, TaskKind, TaskOutcome};
