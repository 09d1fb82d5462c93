//! BlueOcean: ask a language model for a low-competition product strategy and
//! render the answer as classified display blocks.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
