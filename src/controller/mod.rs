//! Stream controller: toggles the named stream container through the engine.
//!
//! Every operation re-resolves the container by name before acting and runs
//! under one lock, so lifecycle changes never interleave.

mod types;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::docker::{ContainerRef, Engine, EngineHandle, ImageRef};
use crate::stream::build_run_spec;

pub use types::{Notification, Resolution, Snapshot};

#[derive(Debug, Default)]
struct State {
    engine: Option<EngineHandle>,
    image: Option<ImageRef>,
    container: Option<ContainerRef>,
    last_error: Option<String>,
}

pub struct StreamController<E> {
    engine: E,
    state: Mutex<State>,
}

impl<E: Engine> StreamController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: Mutex::new(State::default()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Current in-memory handles. May be stale relative to the engine.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            engine: state.engine.clone(),
            image: state.image.clone(),
            container: state.container.clone(),
            last_error: state.last_error.clone(),
        }
    }

    /// Look the stream container up by name, reconnecting first.
    pub fn resolve_container(&self, settings: &Settings) -> Resolution {
        let mut state = self.lock();
        self.resolve(&mut state, &settings.docker_container)
    }

    /// Resolve the configured image. Diagnostic only: `start` lets the engine
    /// pull a missing image.
    pub fn resolve_image(&self, settings: &Settings) -> Option<ImageRef> {
        let mut state = self.lock();
        if !self.connect(&mut state) {
            return None;
        }
        match self.engine.image(&settings.docker_image) {
            Ok(image) => {
                info!(image = %image.name, id = %image.id, "stream image available");
                state.image = Some(image.clone());
                Some(image)
            }
            Err(e) if e.is_not_found() => {
                warn!(image = %settings.docker_image, "stream image not pulled yet, first start will pull it");
                state.image = None;
                None
            }
            Err(e) => {
                error!(image = %settings.docker_image, "image lookup failed: {e}");
                state.image = None;
                state.engine = None;
                state.last_error = Some(e.to_string());
                None
            }
        }
    }

    /// Resolve the image for diagnostics, then report the current stream state.
    pub fn startup(&self, settings: &Settings) -> Notification {
        self.resolve_image(settings);
        self.check(settings)
    }

    pub fn start(&self, settings: &Settings) -> Notification {
        let mut state = self.lock();
        let name = &settings.docker_container;

        if let Resolution::Present(container) = self.resolve(&mut state, name) {
            info!(container = %container.name, "already streaming, nothing to start");
            return Notification::streaming(true);
        }

        let spec = match build_run_spec(settings) {
            Ok(spec) => spec,
            Err(e) => {
                error!(container = %name, "cannot build stream command: {e}");
                state.last_error = Some(e.to_string());
                return Notification::failure(e.to_string());
            }
        };

        if !self.connect(&mut state) {
            let message = state.last_error.clone().unwrap_or_default();
            return Notification::failure(message);
        }

        info!(container = %name, image = %spec.image, "starting stream container");
        match self.engine.run(&spec) {
            Ok(container) => {
                info!(container = %container.name, id = %container.id, "stream container started");
                state.container = Some(container);
                state.last_error = None;
                Notification::streaming(true).with_success("Stream started")
            }
            Err(e) => {
                error!(container = %name, "failed to start stream container: {e}");
                state.container = None;
                state.last_error = Some(e.to_string());
                Notification::failure(e.to_string())
            }
        }
    }

    pub fn stop(&self, settings: &Settings) -> Notification {
        let mut state = self.lock();

        match self.resolve(&mut state, &settings.docker_container) {
            Resolution::Present(container) => match self.engine.stop(&container) {
                Ok(()) => {
                    info!(container = %container.name, "stream container stopped");
                    state.container = None;
                    state.last_error = None;
                    Notification::streaming(false).with_success("Stream stopped")
                }
                Err(e) => {
                    // The handle stays as resolved; a second stop repeats the call.
                    error!(container = %container.name, "failed to stop stream container: {e}");
                    state.last_error = Some(e.to_string());
                    Notification::failure(e.to_string())
                }
            },
            Resolution::Absent => {
                debug!(container = %settings.docker_container, "no stream container to stop");
                Notification::streaming(false)
            }
            Resolution::Unreachable(message) => Notification::failure(message),
        }
    }

    pub fn check(&self, settings: &Settings) -> Notification {
        let mut state = self.lock();

        match self.resolve(&mut state, &settings.docker_container) {
            Resolution::Present(container) => {
                info!(container = %container.name, "stream container is running");
                Notification::streaming(true)
            }
            Resolution::Absent => Notification::streaming(false),
            Resolution::Unreachable(message) => Notification::failure(message),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn connect(&self, state: &mut State) -> bool {
        match self.engine.ping() {
            Ok(handle) => {
                if state.engine.as_ref() != Some(&handle) {
                    debug!(version = %handle.server_version, "connected to container engine");
                }
                state.engine = Some(handle);
                true
            }
            Err(e) => {
                error!("container engine unavailable: {e}");
                state.engine = None;
                state.last_error = Some(e.to_string());
                false
            }
        }
    }

    fn resolve(&self, state: &mut State, name: &str) -> Resolution {
        if !self.connect(state) {
            state.container = None;
            return Resolution::Unreachable(state.last_error.clone().unwrap_or_default());
        }

        match self.engine.container(name) {
            Ok(container) => {
                // Presence is what counts as streaming; an exited container
                // still blocks the name until it is removed.
                if !container.running {
                    warn!(container = %container.name, "stream container exists but is not running");
                }
                state.container = Some(container.clone());
                Resolution::Present(container)
            }
            Err(e) => {
                state.engine = None;
                state.container = None;
                if e.is_not_found() {
                    debug!(container = %name, "stream container not found");
                    Resolution::Absent
                } else {
                    warn!(container = %name, "container lookup failed: {e}");
                    state.last_error = Some(e.to_string());
                    Resolution::Unreachable(e.to_string())
                }
            }
        }
    }
}
