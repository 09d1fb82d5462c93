//! Application services: prompt composition, rendering, the request lifecycle
//! and its progress stages.

pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod progress;
pub mod prompt;
pub mod render;
