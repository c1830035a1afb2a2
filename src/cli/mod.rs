//! CLI for the Pomodoro timer.
//!
//! - `commands`: command definitions using clap derive
//! - `client`: IPC client for daemon communication
//! - `display`: output formatting

pub mod client;
pub mod commands;
pub mod display;

pub use client::{default_socket_path, IpcClient};
pub use commands::{Cli, Commands};
pub use display::Display;
