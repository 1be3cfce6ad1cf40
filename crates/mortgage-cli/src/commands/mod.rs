pub mod config;
pub mod monthly;
pub mod schedule;
pub mod summary;
