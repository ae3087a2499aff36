// ABOUTME: Library root for restartctl - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cluster;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logs;
pub mod output;
pub mod prompt;
pub mod restart;
pub mod types;
