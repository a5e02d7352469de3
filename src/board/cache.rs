use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{watch, Mutex, MutexGuard};

use crate::board::backend::{BackendError, TaskBackend};
use crate::domain::BoardView;

/// Holds the current arrangement of one board.
///
/// Reads are always allowed. Writers that need a consistent
/// read-modify-write cycle take [`BoardStore::lock_mutation`] first; waiters
/// are served in arrival order.
#[derive(Debug)]
pub struct BoardStore {
    board_id: String,
    state: watch::Sender<BoardView>,
    mutation: Mutex<()>,
}

impl BoardStore {
    pub fn new(view: BoardView) -> Self {
        let board_id = view.board.id.clone();
        let (state, _rx) = watch::channel(view);
        Self {
            board_id,
            state,
            mutation: Mutex::new(()),
        }
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn read(&self) -> BoardView {
        self.state.borrow().clone()
    }

    /// Swaps in a whole new arrangement and wakes subscribers.
    pub fn replace(&self, view: BoardView) {
        self.state.send_replace(view);
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.state.subscribe()
    }

    pub async fn lock_mutation(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().await
    }
}

/// Board stores keyed by board id.
#[derive(Debug, Default)]
pub struct BoardCache {
    boards: RwLock<HashMap<String, Arc<BoardStore>>>,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, board_id: &str) -> Option<Arc<BoardStore>> {
        self.boards
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(board_id)
            .cloned()
    }

    /// Stores `view` under its board id. An existing store keeps its
    /// identity, so current subscribers see the new contents; the swap
    /// waits for any in-flight reorder on that board to settle.
    pub async fn insert(&self, view: BoardView) -> Arc<BoardStore> {
        let existing = {
            let mut boards = self.boards.write().unwrap_or_else(PoisonError::into_inner);
            let existing = boards.get(&view.board.id).cloned();
            match existing {
                Some(store) => store,
                None => {
                    let store = Arc::new(BoardStore::new(view));
                    boards.insert(store.board_id().to_string(), Arc::clone(&store));
                    return store;
                }
            }
        };

        let guard = existing.lock_mutation().await;
        existing.replace(view);
        drop(guard);
        existing
    }

    /// Fetches a board from the backend into the cache. A refetch of a
    /// cached board waits for any in-flight reorder on it to settle.
    pub async fn load(
        &self,
        backend: &dyn TaskBackend,
        board_id: &str,
    ) -> Result<Arc<BoardStore>, BackendError> {
        if let Some(store) = self.get(board_id) {
            let _guard = store.lock_mutation().await;
            let view = backend.fetch_tasks(board_id).await?;
            store.replace(view);
            return Ok(Arc::clone(&store));
        }

        let view = backend.fetch_tasks(board_id).await?;
        tracing::debug!(board_id, "Board loaded into cache");
        Ok(self.insert(view).await)
    }

    pub fn evict(&self, board_id: &str) -> Option<Arc<BoardStore>> {
        self.boards
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(board_id)
    }
}
