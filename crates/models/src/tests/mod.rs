
/// Entity round-trips against a migrated SQLite file
pub mod db_tests;
