//! Toggle a containerised webcam live stream from a printer host's UI buttons
//! and print lifecycle events.

pub mod config;
pub mod controller;
pub mod docker;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod stream;
