//! Host-side implementations used by the bundled binary.

pub mod stdio;

use std::sync::mpsc::Sender;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::config::Settings;
use crate::controller::Notification;
use crate::plugin::Host;

/// In-process host: settings held in memory, notifications sent over a channel.
pub struct LocalHost {
    settings: RwLock<Settings>,
    tx: Sender<Notification>,
}

impl LocalHost {
    pub fn new(settings: Settings, tx: Sender<Notification>) -> Self {
        Self {
            settings: RwLock::new(settings),
            tx,
        }
    }

    /// Apply a change to the in-memory settings. Not persisted.
    pub fn update_settings(&self, f: impl FnOnce(&mut Settings)) {
        let mut settings = self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut settings);
    }
}

impl Host for LocalHost {
    fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn send_plugin_message(&self, message: Notification) {
        let streaming = message.streaming;
        if self.tx.send(message).is_err() {
            debug!(streaming, "notification dropped, no receiver");
        }
        self.update_settings(|s| s.streaming = streaming);
    }
}
