//! State backends for the vidsite pipeline.
//!
//! This crate provides:
//! - The [`ProgressStore`] port with in-process and redis backends
//! - The [`VideoCatalog`] port with a Postgres adapter
//! - Collision-checked video id allocation

pub mod allocate;
pub mod catalog;
pub mod error;
pub mod memory;
pub mod progress;
pub mod redis;

pub use allocate::allocate_id;
pub use catalog::{PostgresCatalog, VideoCatalog};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryProgressStore;
pub use progress::ProgressStore;
pub use redis::RedisProgressStore;
