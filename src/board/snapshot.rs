use crate::board::cache::BoardStore;
use crate::domain::BoardView;

/// Frozen copy of a board taken before an optimistic change.
///
/// Restoring consumes the snapshot; dropping it discards it.
#[derive(Debug)]
pub struct BoardSnapshot {
    view: BoardView,
}

impl BoardSnapshot {
    pub fn capture(store: &BoardStore) -> Self {
        Self { view: store.read() }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn restore(self, store: &BoardStore) {
        store.replace(self.view);
    }
}
