use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// API commands the UI button sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    StartStream,
    StopStream,
    CheckStream,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::StartStream,
        Command::StopStream,
        Command::CheckStream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::StartStream => "startStream",
            Command::StopStream => "stopStream",
            Command::CheckStream => "checkStream",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown command: {s}"))
    }
}

/// Printer lifecycle events delivered by the host's event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PrintStarted,
    PrintDone,
    PrintCancelled,
    Other(String),
}

impl Event {
    pub fn as_str(&self) -> &str {
        match self {
            Event::PrintStarted => "PrintStarted",
            Event::PrintDone => "PrintDone",
            Event::PrintCancelled => "PrintCancelled",
            Event::Other(name) => name,
        }
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        match name {
            "PrintStarted" => Event::PrintStarted,
            "PrintDone" => Event::PrintDone,
            "PrintCancelled" => Event::PrintCancelled,
            other => Event::Other(other.to_string()),
        }
    }
}

/// Synchronous answer to an API command. The stream state itself arrives
/// separately as a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResponse {
    Accepted,
    Forbidden,
}

impl CommandResponse {
    pub const FORBIDDEN_MESSAGE: &'static str = "Insufficient rights";

    pub fn status_code(&self) -> u16 {
        match self {
            CommandResponse::Accepted => 204,
            CommandResponse::Forbidden => 403,
        }
    }
}
