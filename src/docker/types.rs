use thiserror::Error;

/// Failure talking to the container engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to invoke `docker`, is it installed and on PATH? ({0})")]
    Spawn(#[source] std::io::Error),
    #[error("docker daemon is unreachable: {0}")]
    Unreachable(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound(_))
    }

    /// Whether the error means the engine itself could not be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, EngineError::Spawn(_) | EngineError::Unreachable(_))
    }
}

/// A verified connection to the engine daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineHandle {
    pub server_version: String,
}

/// A pulled image, resolved by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub id: String,
    pub name: String,
}

/// A named container known to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub id: String,
    pub name: String,
    pub running: bool,
}

/// Describes a detached container launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub detach: bool,
    pub privileged: bool,
    pub devices: Vec<String>,
    pub auto_remove: bool,
    pub network_mode: String,
}

impl RunSpec {
    /// Full argument list passed to `docker`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string()];
        if self.detach {
            args.push("--detach".into());
        }
        if self.auto_remove {
            args.push("--rm".into());
        }
        if self.privileged {
            args.push("--privileged".into());
        }
        args.extend(["--name".into(), self.name.clone()]);
        args.extend(["--network".into(), self.network_mode.clone()]);
        for device in &self.devices {
            args.extend(["--device".into(), device.clone()]);
        }
        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}
