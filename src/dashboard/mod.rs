//! The reactive dashboard: recomputes the view whenever orders or filters change.

pub mod error;
pub mod service;
pub mod view;

pub use error::*;
pub use service::*;
pub use view::*;
