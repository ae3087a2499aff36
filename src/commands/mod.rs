// ABOUTME: Command module aggregator for the restartctl CLI.
// ABOUTME: Re-exports restart and logs command handlers.

mod cluster_connection;
mod logs;
mod restart;

pub use cluster_connection::load_config;
pub use logs::logs;
pub use restart::restart;
