//! Worker tasks that back the runtime orchestration.

mod scheduler;

pub use scheduler::{Command, SchedulerWorker};
