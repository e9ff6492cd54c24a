mod item;
pub use item::{Task, TaskId};

mod result;
pub use result::{FailureKind, TaskFailure, TaskOutcome, TaskResult, TaskSuccess};

mod summary;
pub use summary::RunSummary;
