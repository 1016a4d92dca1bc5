//! Request handlers.

pub mod health;
pub mod progress;
pub mod upload;
pub mod videos;

pub use health::*;
pub use progress::*;
pub use upload::*;
pub use videos::*;
