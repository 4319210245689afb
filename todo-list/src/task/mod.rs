pub mod api;
pub mod dto;
pub mod repository;
pub mod search;
pub mod unit_of_work;

pub use api::{TodoState, create_todo_router};
pub use dto::TodoDto;
pub use repository::TaskRepository;
pub use search::SearchRepository;
pub use unit_of_work::UnitOfWork;
