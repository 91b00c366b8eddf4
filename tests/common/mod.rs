//! In-memory container engine shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use webcamstreamer::config::Settings;
use webcamstreamer::docker::{ContainerRef, Engine, EngineError, EngineHandle, ImageRef, RunSpec};

pub const UNREACHABLE: &str =
    "Cannot connect to the Docker daemon at unix:///var/run/docker.sock. Is the docker daemon running?";

#[derive(Debug, Default)]
pub struct FakeState {
    pub reachable: bool,
    pub images: Vec<String>,
    pub containers: HashMap<String, ContainerRef>,
    pub pings: usize,
    pub run_calls: Vec<RunSpec>,
    pub stop_calls: Vec<String>,
    pub fail_run: Option<String>,
    pub fail_stop: Option<String>,
    /// Delay inside `run`, after the call is recorded.
    pub run_delay: Option<Duration>,
    next_id: u32,
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    state: Mutex<FakeState>,
}

impl FakeEngine {
    pub fn new() -> Self {
        let engine = Self::default();
        engine.state().reachable = true;
        engine
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Pretend a container with this name is already running.
    pub fn add_container(&self, name: &str) {
        self.insert_container(name, true);
    }

    /// A container that exited but was not removed.
    pub fn add_stopped_container(&self, name: &str) {
        self.insert_container(name, false);
    }

    fn insert_container(&self, name: &str, running: bool) {
        let mut state = self.state();
        state.next_id += 1;
        let id = format!("c{:04}", state.next_id);
        state.containers.insert(
            name.to_string(),
            ContainerRef {
                id,
                name: name.to_string(),
                running,
            },
        );
    }

    /// The container exited on its own and auto-remove deleted it.
    pub fn remove_container(&self, name: &str) {
        self.state().containers.remove(name);
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.state().containers.contains_key(name)
    }

    pub fn run_count(&self) -> usize {
        self.state().run_calls.len()
    }

    pub fn stop_count(&self) -> usize {
        self.state().stop_calls.len()
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.state().reachable = reachable;
    }

    fn check_reachable(state: &FakeState) -> Result<(), EngineError> {
        if state.reachable {
            Ok(())
        } else {
            Err(EngineError::Unreachable(UNREACHABLE.to_string()))
        }
    }
}

impl Engine for FakeEngine {
    fn ping(&self) -> Result<EngineHandle, EngineError> {
        let mut state = self.state();
        state.pings += 1;
        Self::check_reachable(&state)?;
        Ok(EngineHandle {
            server_version: "27.0.3".to_string(),
        })
    }

    fn image(&self, name: &str) -> Result<ImageRef, EngineError> {
        let state = self.state();
        Self::check_reachable(&state)?;
        if state.images.iter().any(|i| i == name) {
            Ok(ImageRef {
                id: format!("sha256:{name}"),
                name: name.to_string(),
            })
        } else {
            Err(EngineError::NotFound(format!("Error: No such image: {name}")))
        }
    }

    fn container(&self, name: &str) -> Result<ContainerRef, EngineError> {
        let state = self.state();
        Self::check_reachable(&state)?;
        state
            .containers
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("Error: No such container: {name}")))
    }

    fn run(&self, spec: &RunSpec) -> Result<ContainerRef, EngineError> {
        let delay = {
            let mut state = self.state();
            Self::check_reachable(&state)?;
            state.run_calls.push(spec.clone());
            state.run_delay
        };
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let mut state = self.state();
        if let Some(message) = state.fail_run.clone() {
            return Err(EngineError::Failed(message));
        }
        if state.containers.contains_key(&spec.name) {
            return Err(EngineError::Failed(format!(
                "Conflict. The container name \"/{}\" is already in use",
                spec.name
            )));
        }
        state.next_id += 1;
        let container = ContainerRef {
            id: format!("c{:04}", state.next_id),
            name: spec.name.clone(),
            running: true,
        };
        state
            .containers
            .insert(spec.name.clone(), container.clone());
        Ok(container)
    }

    fn stop(&self, container: &ContainerRef) -> Result<(), EngineError> {
        let mut state = self.state();
        Self::check_reachable(&state)?;
        state.stop_calls.push(container.name.clone());
        if let Some(message) = state.fail_stop.clone() {
            return Err(EngineError::Failed(message));
        }
        // Auto-remove: a stopped container disappears.
        match state.containers.remove(&container.name) {
            Some(_) => Ok(()),
            None => Err(EngineError::NotFound(format!(
                "Error: No such container: {}",
                container.name
            ))),
        }
    }
}

pub fn settings() -> Settings {
    Settings {
        webcam_url: "http://cam".into(),
        stream_url: "rtmp://x".into(),
        cmd: "in={webcam_url} out={stream_url} fps={frame_rate} gop={gop_size} vf={filter}".into(),
        frame_rate: 5,
        ..Settings::default()
    }
}
