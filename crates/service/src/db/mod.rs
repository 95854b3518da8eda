pub mod cafe_service;
pub mod todo_service;
