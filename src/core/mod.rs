//! Core application primitives (HTTP service, insight runtime)

pub mod http;
pub mod runtime;

pub use http::*;
pub use runtime::*;
