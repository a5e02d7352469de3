use serde::{Deserialize, Serialize};

use crate::domain::{Board, Task};

/// Change feed entry pushed to connected dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    BoardCreated { board: Board },
    BoardUpdated { board: Board },
    BoardDeleted { user_id: String, board_id: String },
    TaskCreated { task: Task },
    TaskUpdated { task: Task },
    TaskDeleted { user_id: String, board_id: String, task_id: String },
}

impl BoardEvent {
    pub fn user_id(&self) -> &str {
        match self {
            BoardEvent::BoardCreated { board } | BoardEvent::BoardUpdated { board } => {
                &board.user_id
            }
            BoardEvent::TaskCreated { task } | BoardEvent::TaskUpdated { task } => &task.user_id,
            BoardEvent::BoardDeleted { user_id, .. } | BoardEvent::TaskDeleted { user_id, .. } => {
                user_id
            }
        }
    }
}
