//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod gemini;
pub mod telemetry;
