pub mod content_extraction;
pub mod host;

pub use host::origin_from_host;
