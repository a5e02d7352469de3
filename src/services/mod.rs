pub mod board_service;
pub mod task_service;

pub use board_service::BoardService;
pub use task_service::TaskService;
