//! Service layer providing the store operations on top of `models`.
//! - `db::*_service` are thin, transactional functions over a `DatabaseConnection`.
//! - `cafe` wraps them behind a repository trait and adds the request-level rules
//!   (empty result is not-found, random pick, duplicate names).

pub mod errors;
pub mod db;
pub mod cafe;
#[cfg(test)]
pub mod test_support;
