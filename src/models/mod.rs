pub mod app;
pub mod backend;
pub mod openai;

pub use app::*;
pub use backend::*;
pub use openai::*;
