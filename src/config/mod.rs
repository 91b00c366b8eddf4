mod loader;
mod types;

pub use loader::{CONFIG_FILE, load, load_from};
pub use types::{DEFAULT_COMMAND, LoggingConfig, Settings, WebcamSettings};
