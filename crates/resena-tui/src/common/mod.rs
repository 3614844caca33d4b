//! Building blocks shared by the feature slices.

mod task;
mod text;
mod text_field;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{dash_or, truncate_with_ellipsis};
pub use text_field::{CursorMove, TextField};
