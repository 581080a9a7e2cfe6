pub mod errors;
pub mod identity;
pub mod import;
pub mod import_code;
pub mod ports;
pub mod stats;
pub mod status;
