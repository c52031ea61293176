pub mod auth;
pub mod backend;
pub mod cancellation;
pub mod context;
pub mod delta;
pub mod envelope;
pub mod error_formatting;
pub mod stream_driver;
pub mod streaming;
pub mod translator;

#[cfg(test)]
pub mod test_support;

pub use auth::*;
pub use envelope::*;
pub use stream_driver::*;
pub use translator::*;
