pub mod import_repo;
#[cfg(test)]
pub mod memory_repo;
pub mod models;
