pub mod file_name;
pub mod let_also;
pub mod serde;
