pub mod routes;
pub mod startup;
pub mod errors;
pub mod html;
pub mod openapi;

pub use startup::{load_config, run_cafe_api, run_todo_app};
