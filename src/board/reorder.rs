use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::backend::{BackendError, TaskBackend};
use crate::board::cache::BoardStore;
use crate::board::notify::{NoticeKind, Notifier};
use crate::board::snapshot::BoardSnapshot;
use crate::config::Config;
use crate::domain::{BoardView, Status, Task};

pub const PERSIST_FAILURE_MESSAGE: &str =
    "Failed to update task status, please check your internet connection";

/// A slot in the rendered board: column plus position inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub column: Status,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column: Status, index: usize) -> Self {
        Self { column, index }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub board: BoardView,
    pub task_id: String,
    /// Set when the task changed column.
    pub status_change: Option<Status>,
}

/// Computes the arrangement after dragging the task at `source` to
/// `destination`. Returns `None` when either location does not exist in
/// `view`.
pub fn plan_move(
    view: &BoardView,
    source: DragLocation,
    destination: DragLocation,
) -> Option<PlannedMove> {
    let mut board = view.clone();

    let source_tasks = &mut board.column_mut(source.column)?.tasks;
    if source.index >= source_tasks.len() {
        return None;
    }
    let mut moved = source_tasks.remove(source.index);
    let task_id = moved.id.clone();

    let status_change = if source.column == destination.column {
        None
    } else {
        moved.status = destination.column;
        Some(destination.column)
    };

    let destination_tasks = &mut board.column_mut(destination.column)?.tasks;
    if destination.index > destination_tasks.len() {
        return None;
    }
    destination_tasks.insert(destination.index, moved);

    Some(PlannedMove {
        board,
        task_id,
        status_change,
    })
}

#[derive(Debug)]
pub enum MoveOutcome {
    /// Dropped outside a column, onto its own slot, or onto a slot that
    /// does not exist. Nothing changed.
    Ignored,
    /// Reordered inside one column. Kept locally only.
    Reordered,
    /// Moved to another column and the backend accepted the new status.
    Persisted(Task),
    /// The backend refused or never answered; the board is back to how it
    /// was before the drag.
    RolledBack(BackendError),
}

/// Applies drag-and-drop results to a cached board optimistically and
/// reconciles with the backend.
///
/// Moves on the same board are serialised: a drag that arrives while
/// another is still waiting on the backend queues behind it.
pub struct ReorderController {
    store: Arc<BoardStore>,
    backend: Arc<dyn TaskBackend>,
    notifier: Arc<dyn Notifier>,
    persist_timeout: Duration,
}

impl ReorderController {
    pub fn new(
        store: Arc<BoardStore>,
        backend: Arc<dyn TaskBackend>,
        notifier: Arc<dyn Notifier>,
        persist_timeout: Duration,
    ) -> Self {
        Self {
            store,
            backend,
            notifier,
            persist_timeout,
        }
    }

    /// Same as [`ReorderController::new`] with the persist timeout taken
    /// from `REORDER_TIMEOUT_MS`.
    pub fn with_config(
        store: Arc<BoardStore>,
        backend: Arc<dyn TaskBackend>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
    ) -> Self {
        Self::new(store, backend, notifier, config.reorder_timeout())
    }

    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }

    pub async fn apply_move(
        &self,
        source: DragLocation,
        destination: Option<DragLocation>,
    ) -> MoveOutcome {
        let Some(destination) = destination else {
            return MoveOutcome::Ignored;
        };
        if source == destination {
            return MoveOutcome::Ignored;
        }

        let _guard = self.store.lock_mutation().await;

        let snapshot = BoardSnapshot::capture(&self.store);
        let Some(planned) = plan_move(snapshot.view(), source, destination) else {
            tracing::warn!(
                board_id = self.store.board_id(),
                ?source,
                ?destination,
                "Ignoring move to or from a slot that is not on the board"
            );
            return MoveOutcome::Ignored;
        };

        self.store.replace(planned.board);

        let Some(status) = planned.status_change else {
            return MoveOutcome::Reordered;
        };

        // From here until the backend answers the board shows a change the
        // server has not accepted. If this future is dropped, the guard puts
        // the board back.
        let pending = PendingRollback::arm(snapshot, &self.store, self.notifier.as_ref());

        let result = tokio::time::timeout(
            self.persist_timeout,
            self.backend.update_task_status(&planned.task_id, status),
        )
        .await
        .unwrap_or_else(|_| Err(BackendError::Timeout(self.persist_timeout)));

        match result {
            Ok(task) => {
                pending.disarm();
                tracing::debug!(
                    board_id = self.store.board_id(),
                    task_id = planned.task_id.as_str(),
                    status = status.as_str(),
                    "Task move persisted"
                );
                MoveOutcome::Persisted(task)
            }
            Err(e) => {
                tracing::warn!(
                    board_id = self.store.board_id(),
                    task_id = planned.task_id.as_str(),
                    error = %e,
                    "Task move failed, rolling back"
                );
                pending.roll_back();
                MoveOutcome::RolledBack(e)
            }
        }
    }
}

/// Restores the snapshot and tells the user, unless disarmed first.
/// Dropping it armed counts as a failed move.
struct PendingRollback<'a> {
    snapshot: Option<BoardSnapshot>,
    store: &'a BoardStore,
    notifier: &'a dyn Notifier,
}

impl<'a> PendingRollback<'a> {
    fn arm(snapshot: BoardSnapshot, store: &'a BoardStore, notifier: &'a dyn Notifier) -> Self {
        Self {
            snapshot: Some(snapshot),
            store,
            notifier,
        }
    }

    fn disarm(mut self) {
        self.snapshot = None;
    }

    fn roll_back(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore(self.store);
            self.notifier.notify(NoticeKind::Error, PERSIST_FAILURE_MESSAGE);
        }
    }
}

impl Drop for PendingRollback<'_> {
    fn drop(&mut self) {
        if self.snapshot.is_some() {
            tracing::warn!(
                board_id = self.store.board_id(),
                "Task move abandoned before the backend answered, rolling back"
            );
            self.restore();
        }
    }
}
