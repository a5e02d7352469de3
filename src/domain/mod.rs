pub mod board;
pub mod error;
pub mod event;
pub mod status;

pub use board::{Board, BoardSummary, BoardView, Column, PaginatedList, Task, User};
pub use error::TaskboardError;
pub use event::BoardEvent;
pub use status::{Priority, Status};
