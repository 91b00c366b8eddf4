// Container engine access: the `Engine` seam and its `docker` CLI adapter.

pub mod engine;
pub mod types;

pub use engine::{DockerCli, Engine, classify_failure};
pub use types::{ContainerRef, EngineError, EngineHandle, ImageRef, RunSpec};
