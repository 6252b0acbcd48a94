pub mod dates;
pub mod order;
pub mod viewer;

pub use dates::*;
pub use order::*;
pub use viewer::*;
