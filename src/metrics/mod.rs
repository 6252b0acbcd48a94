//! Date filtering and the derived dashboard metrics.
//!
//! Everything here is a pure function over an order slice; none of it
//! blocks, awaits or fails.

pub mod filter;
pub mod policy;
pub mod salary;
pub mod stats;
pub mod target;

pub use filter::*;
pub use policy::*;
pub use salary::*;
pub use stats::*;
pub use target::*;
