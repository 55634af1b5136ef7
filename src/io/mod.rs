pub mod export;

pub use export::{from_json, to_json, write_json, ExportError, DEFAULT_EXPORT_NAME};
