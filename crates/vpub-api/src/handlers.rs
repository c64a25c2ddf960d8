//! Request handlers.

pub mod catalog;
pub mod health;
pub mod upload;

pub use catalog::*;
pub use health::*;
pub use upload::*;
