pub mod boards;
pub mod tasks;

pub use boards::{BoardRequest, ListBoardsQuery};
pub use tasks::{CreateTaskRequest, UpdateTaskRequest};
