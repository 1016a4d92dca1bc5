//! Pipeline services behind the handlers.

pub mod pipeline;
