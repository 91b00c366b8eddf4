use std::time::{Duration, Instant};

use webcamstreamer::config::Settings;
use webcamstreamer::controller::Notification;
use webcamstreamer::plugin::{Command, Event};

const LOG_CAPACITY: usize = 200;

/// Work handed to the plugin worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Startup,
    Command(Command),
    Event(Event),
}

/// Kind of a notification-log entry, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Sent,
    Streaming,
    Idle,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: Duration,
    pub kind: EntryKind,
    pub text: String,
}

/// Top-level application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    /// Stream state as last reported by the plugin.
    pub streaming: bool,
    /// A command is in flight and no notification has answered it yet.
    pub processing: bool,
    pub last_error: Option<String>,

    /// Settings as last read from the host.
    pub settings: Settings,
    /// Newest entry last.
    pub log: Vec<LogEntry>,
    /// Animation counter, advanced once per frame.
    pub tick: usize,

    started: Instant,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            running: true,
            show_help: false,
            streaming: settings.streaming,
            processing: false,
            last_error: None,
            settings,
            log: Vec::new(),
            tick: 0,
            started: Instant::now(),
        }
    }

    /// Command the toggle button sends in the current state.
    pub fn toggle_command(&self) -> Command {
        if self.streaming {
            Command::StopStream
        } else {
            Command::StartStream
        }
    }

    /// Record an action handed to the worker.
    pub fn begin(&mut self, action: &Action) {
        match action {
            Action::Startup => {
                self.processing = true;
                self.push(EntryKind::Sent, "startup".to_string());
            }
            Action::Command(command) => {
                self.processing = true;
                self.push(EntryKind::Sent, command.to_string());
            }
            Action::Event(event) => {
                let text = if self.settings.auto_start {
                    format!("event {}", event.as_str())
                } else {
                    format!("event {} (auto-start off, ignored)", event.as_str())
                };
                self.push(EntryKind::Sent, text);
            }
        }
    }

    /// Apply a notification from the plugin.
    pub fn apply(&mut self, note: Notification) {
        self.processing = false;
        self.streaming = note.streaming;
        self.settings.streaming = note.streaming;

        if let Some(error) = note.error {
            self.push(EntryKind::Error, error.clone());
            self.last_error = Some(error);
            return;
        }

        self.last_error = None;
        let text = match note.success {
            Some(success) => success,
            None if note.streaming => "streaming".to_string(),
            None => "not streaming".to_string(),
        };
        let kind = if note.streaming {
            EntryKind::Streaming
        } else {
            EntryKind::Idle
        };
        self.push(kind, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(EntryKind::Info, text.into());
    }

    fn push(&mut self, kind: EntryKind, text: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.remove(0);
        }
        self.log.push(LogEntry {
            at: self.started.elapsed(),
            kind,
            text,
        });
    }
}
