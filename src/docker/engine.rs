use std::process::{Command, Stdio};

use tracing::debug;

use super::types::{ContainerRef, EngineError, EngineHandle, ImageRef, RunSpec};

/// Operations the stream controller needs from a container engine.
///
/// Every call blocks until the engine answers. Implementations must not
/// retry on their own.
pub trait Engine: Send + Sync {
    /// Verify the daemon is reachable.
    fn ping(&self) -> Result<EngineHandle, EngineError>;
    fn image(&self, name: &str) -> Result<ImageRef, EngineError>;
    fn container(&self, name: &str) -> Result<ContainerRef, EngineError>;
    /// Launch a container and return its handle once the engine accepted it.
    fn run(&self, spec: &RunSpec) -> Result<ContainerRef, EngineError>;
    fn stop(&self, container: &ContainerRef) -> Result<(), EngineError>;
}

/// Engine adapter that shells out to the `docker` CLI.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run `docker <args>` and return trimmed stdout, or the classified stderr.
    fn docker<S: AsRef<str>>(&self, args: &[S]) -> Result<String, EngineError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!(binary = %self.binary, ?args, "invoking container engine");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(EngineError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.trim().is_empty() {
                return Err(EngineError::Failed(format!(
                    "docker {} exited with {}",
                    args.first().copied().unwrap_or_default(),
                    output.status
                )));
            }
            return Err(classify_failure(&stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Engine for DockerCli {
    fn ping(&self) -> Result<EngineHandle, EngineError> {
        let version = self
            .docker(&["version", "--format", "{{.Server.Version}}"])
            .map_err(|e| match e {
                EngineError::Failed(msg) | EngineError::NotFound(msg) => {
                    EngineError::Unreachable(msg)
                }
                other => other,
            })?;
        Ok(EngineHandle {
            server_version: version,
        })
    }

    fn image(&self, name: &str) -> Result<ImageRef, EngineError> {
        let id = self.docker(&["image", "inspect", "--format", "{{.Id}}", name])?;
        Ok(ImageRef {
            id,
            name: name.to_string(),
        })
    }

    fn container(&self, name: &str) -> Result<ContainerRef, EngineError> {
        let stdout = self.docker(&[
            "container",
            "inspect",
            "--format",
            "{{.Id}} {{.State.Running}}",
            name,
        ])?;
        parse_container(name, &stdout)
    }

    fn run(&self, spec: &RunSpec) -> Result<ContainerRef, EngineError> {
        let stdout = self.docker(spec.to_args().as_slice())?;
        // Detached runs print the new container id; pull progress may precede it.
        let id = stdout.lines().last().unwrap_or_default().trim().to_string();
        Ok(ContainerRef {
            id,
            name: spec.name.clone(),
            running: true,
        })
    }

    fn stop(&self, container: &ContainerRef) -> Result<(), EngineError> {
        let target = if container.id.is_empty() {
            &container.name
        } else {
            &container.id
        };
        self.docker(&["stop", target.as_str()])?;
        Ok(())
    }
}

/// Map `docker` stderr to an [`EngineError`].
pub fn classify_failure(stderr: &str) -> EngineError {
    let message = stderr.trim().to_string();
    let lower = message.to_ascii_lowercase();

    if lower.contains("no such container")
        || lower.contains("no such image")
        || lower.contains("no such object")
    {
        return EngineError::NotFound(message);
    }

    if lower.contains("cannot connect to the docker daemon")
        || lower.contains("is the docker daemon running")
        || lower.contains("error during connect")
    {
        return EngineError::Unreachable(message);
    }

    EngineError::Failed(message)
}

/// Parse the `{{.Id}} {{.State.Running}}` inspect line.
pub fn parse_container(name: &str, stdout: &str) -> Result<ContainerRef, EngineError> {
    let mut parts = stdout.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(id), Some(running)) => Ok(ContainerRef {
            id: id.to_string(),
            name: name.to_string(),
            running: running == "true",
        }),
        _ => Err(EngineError::Failed(format!(
            "unexpected inspect output for {name}: {stdout:?}"
        ))),
    }
}
