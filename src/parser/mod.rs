pub mod header;
pub mod record;

pub use header::HeaderMap;
pub use record::{parse_record, Record};
