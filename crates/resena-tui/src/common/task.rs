//! Request ids and per-slot request tracking.
//!
//! Every request the reducer issues gets a fresh `TaskId` from `TaskSeq`
//! and is recorded as the active request of its slot (`TaskKind`). A
//! completion is applied only if its id is still the active one for the
//! slot, so a slow response can never overwrite the result of a newer
//! request for the same slot.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic request id generator.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Register,
    MovieList,
    MovieCreate,
    ReviewList,
    ReviewCreate,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::Login,
        TaskKind::Register,
        TaskKind::MovieList,
        TaskKind::MovieCreate,
        TaskKind::ReviewList,
        TaskKind::ReviewCreate,
    ];

    /// Reads can be abandoned when superseded; writes always run to completion.
    pub fn is_cancelable(self) -> bool {
        matches!(self, TaskKind::MovieList | TaskKind::ReviewList)
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Lifecycle of one request slot (stored in `AppState`, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Makes `id` the latest request of this slot.
    ///
    /// Returns the cancel token of the request it supersedes, if any.
    pub fn begin(&mut self, id: TaskId) -> Option<CancellationToken> {
        self.active = Some(id);
        self.cancel.take()
    }

    /// Records the cancel token of a started request.
    ///
    /// Returns false if the request was already superseded.
    pub fn on_started(&mut self, started: &TaskStarted) -> bool {
        if self.active == Some(started.id) {
            self.cancel.clone_from(&started.cancel);
            true
        } else {
            false
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Forgets the active request. Returns its cancel token.
    pub fn clear(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub register: TaskState,
    pub movie_list: TaskState,
    pub movie_create: TaskState,
    pub review_list: TaskState,
    pub review_create: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Register => &self.register,
            TaskKind::MovieList => &self.movie_list,
            TaskKind::MovieCreate => &self.movie_create,
            TaskKind::ReviewList => &self.review_list,
            TaskKind::ReviewCreate => &self.review_create,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::MovieList => &mut self.movie_list,
            TaskKind::MovieCreate => &mut self.movie_create,
            TaskKind::ReviewList => &mut self.review_list,
            TaskKind::ReviewCreate => &mut self.review_create,
        }
    }

    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.state(kind).is_running()
    }

    pub fn is_any_running(&self) -> bool {
        TaskKind::ALL.iter().any(|kind| self.is_running(*kind))
    }
}
