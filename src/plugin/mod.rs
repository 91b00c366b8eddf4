//! The narrow interface between the stream controller and its host
//! application: callbacks the host invokes, and calls made back into it.

mod types;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::controller::{Notification, StreamController};
use crate::docker::Engine;

pub use types::{Command, CommandResponse, Event};

/// Identifier the host uses to route plugin messages.
pub const IDENTIFIER: &str = "webcamstreamer";

/// Services the host provides to the plugin.
pub trait Host: Send + Sync {
    /// Current settings. Read on every operation, never cached by the plugin.
    fn settings(&self) -> Settings;
    /// Push a status message to the UI.
    fn send_plugin_message(&self, message: Notification);
}

/// Callbacks the host invokes.
pub trait Plugin: Send + Sync {
    fn on_startup(&self);
    /// `permitted` is the host's verdict on the caller's rights.
    fn on_command(&self, command: Command, permitted: bool) -> CommandResponse;
    fn on_event(&self, event: &Event);
}

pub struct WebcamStreamer<E, H> {
    controller: StreamController<E>,
    host: H,
}

impl<E: Engine, H: Host> WebcamStreamer<E, H> {
    pub fn new(engine: E, host: H) -> Self {
        Self {
            controller: StreamController::new(engine),
            host,
        }
    }

    pub fn controller(&self) -> &StreamController<E> {
        &self.controller
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn start_stream(&self, settings: &Settings) {
        let message = self.controller.start(settings);
        self.host.send_plugin_message(message);
    }

    fn stop_stream(&self, settings: &Settings) {
        let message = self.controller.stop(settings);
        self.host.send_plugin_message(message);
    }
}

impl<E: Engine, H: Host> Plugin for WebcamStreamer<E, H> {
    fn on_startup(&self) {
        info!("webcam streamer loaded, checking stream status");
        let settings = self.host.settings();
        let message = self.controller.startup(&settings);
        self.host.send_plugin_message(message);
    }

    fn on_command(&self, command: Command, permitted: bool) -> CommandResponse {
        if !permitted {
            warn!(%command, "rejected command from unauthorized caller");
            return CommandResponse::Forbidden;
        }

        let settings = self.host.settings();
        match command {
            Command::StartStream => {
                info!("start stream command received");
                self.start_stream(&settings);
            }
            Command::StopStream => {
                info!("stop stream command received");
                self.stop_stream(&settings);
            }
            Command::CheckStream => {
                info!("checking stream status");
                let message = self.controller.check(&settings);
                self.host.send_plugin_message(message);
            }
        }
        CommandResponse::Accepted
    }

    fn on_event(&self, event: &Event) {
        let settings = self.host.settings();
        if !settings.auto_start {
            return;
        }

        match event {
            Event::PrintStarted => {
                info!("print started, starting stream");
                self.start_stream(&settings);
            }
            Event::PrintDone | Event::PrintCancelled => {
                info!(event = event.as_str(), "print ended, stopping stream");
                self.stop_stream(&settings);
            }
            Event::Other(name) => debug!(event = %name, "ignoring event"),
        }
    }
}
