//! JSON-lines bridge for hosts running in another process.
//!
//! Each input line is a command (`{"command": "startStream", "permitted": true}`)
//! or an event (`{"event": "PrintStarted"}`). Notifications are written as
//! `{"plugin": "webcamstreamer", "data": {...}}`; rejected or malformed requests
//! as `{"response": <code>, "message": "..."}`.

use std::io::{BufRead, Write};
use std::sync::mpsc::Receiver;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::controller::Notification;
use crate::plugin::{Command, CommandResponse, Event, IDENTIFIER, Plugin};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Request {
    Command {
        command: Command,
        /// Caller rights as decided by the host. Absent means denied.
        #[serde(default)]
        permitted: bool,
    },
    Event {
        event: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Reply<'a> {
    Message {
        plugin: &'a str,
        data: &'a Notification,
    },
    Response {
        response: u16,
        message: String,
    },
}

/// Run the plugin's startup, then dispatch requests until `input` ends.
///
/// Notifications produced by each request are written before the next line
/// is read.
pub fn serve<P, R, W>(
    plugin: &P,
    notifications: &Receiver<Notification>,
    input: R,
    output: &mut W,
) -> Result<()>
where
    P: Plugin,
    R: BufRead,
    W: Write,
{
    plugin.on_startup();
    flush_notifications(notifications, output)?;

    for line in input.lines() {
        let line = line.context("failed to read request")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Request>(line) {
            Ok(Request::Command { command, permitted }) => {
                if plugin.on_command(command, permitted) == CommandResponse::Forbidden {
                    write_reply(
                        output,
                        &Reply::Response {
                            response: CommandResponse::Forbidden.status_code(),
                            message: CommandResponse::FORBIDDEN_MESSAGE.to_string(),
                        },
                    )?;
                }
            }
            Ok(Request::Event { event }) => plugin.on_event(&Event::from(event.as_str())),
            Err(e) => {
                warn!("malformed request {line:?}: {e}");
                write_reply(
                    output,
                    &Reply::Response {
                        response: 400,
                        message: format!("malformed request: {e}"),
                    },
                )?;
            }
        }

        flush_notifications(notifications, output)?;
    }

    Ok(())
}

fn flush_notifications<W: Write>(
    notifications: &Receiver<Notification>,
    output: &mut W,
) -> Result<()> {
    while let Ok(data) = notifications.try_recv() {
        write_reply(
            output,
            &Reply::Message {
                plugin: IDENTIFIER,
                data: &data,
            },
        )?;
    }
    Ok(())
}

fn write_reply<W: Write>(output: &mut W, reply: &Reply<'_>) -> Result<()> {
    serde_json::to_writer(&mut *output, reply).context("failed to encode reply")?;
    output.write_all(b"\n").context("failed to write reply")?;
    output.flush().context("failed to flush reply")?;
    Ok(())
}
