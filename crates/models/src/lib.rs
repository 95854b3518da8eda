pub mod errors;
pub mod db;
pub mod cafe;
pub mod todo;

#[cfg(test)]
mod tests;
