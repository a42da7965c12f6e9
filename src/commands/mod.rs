//! Command implementations.
//!
//! The binary runs a single command: [`update`] rescans the content root
//! and rewrites its manifest.

pub mod update;
