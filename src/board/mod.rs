//! Client-side board state: an in-memory cache of boards and the
//! optimistic drag-and-drop protocol that keeps it in step with the server.
//!
//! A drag is applied to the cache immediately. Moves that change a task's
//! column are then persisted through a [`TaskBackend`]; if that fails, the
//! board is restored from a [`BoardSnapshot`] taken before the move and the
//! user is told through a [`Notifier`].

pub mod backend;
pub mod cache;
pub mod http;
pub mod notify;
pub mod reorder;
pub mod snapshot;

pub use backend::{BackendError, LocalTaskBackend, TaskBackend};
pub use cache::{BoardCache, BoardStore};
pub use http::HttpTaskBackend;
pub use notify::{BroadcastNotifier, Notice, NoticeKind, Notifier};
pub use reorder::{plan_move, DragLocation, MoveOutcome, PlannedMove, ReorderController};
pub use snapshot::BoardSnapshot;
