pub mod database;
pub mod export;
