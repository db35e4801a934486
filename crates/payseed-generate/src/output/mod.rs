//! Writers for generated tables.

pub mod json;

pub use json::{REPORT_FILE_NAME, write_dataset, write_json_atomic};
