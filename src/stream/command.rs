use thiserror::Error;

use crate::config::Settings;
use crate::docker::RunSpec;

use super::params::StreamParams;
use super::template::{CommandTemplate, TemplateError};

/// Hardware video encoder on the Raspberry Pi.
pub const ENCODER_DEVICE: &str = "/dev/vchiq";
/// The stream container shares the host network so it can reach the local webcam.
pub const NETWORK_MODE: &str = "host";

#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("rendered command is not valid shell syntax: {0}")]
    Split(#[from] shell_words::ParseError),
    #[error("rendered command is empty")]
    EmptyCommand,
    #[error("frame rate must be a positive integer")]
    InvalidFrameRate,
}

/// Render the configured template into an argument vector.
pub fn render_command(settings: &Settings) -> Result<Vec<String>, StreamError> {
    if settings.frame_rate == 0 {
        return Err(StreamError::InvalidFrameRate);
    }
    let template = CommandTemplate::parse(&settings.cmd)?;
    let rendered = template.render(&StreamParams::from_settings(settings));
    let argv = shell_words::split(&escape_comment_marks(&rendered))?;
    if argv.is_empty() {
        return Err(StreamError::EmptyCommand);
    }
    Ok(argv)
}

/// Escape a `#` that opens an unquoted word, so `shell_words` keeps it as an
/// argument instead of dropping the rest of the line as a comment.
fn escape_comment_marks(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut word_start = true;

    for c in command.chars() {
        let literal = escaped;
        escaped = false;
        if !literal {
            match (quote, c) {
                (Some(q), _) if c == q => quote = None,
                (None | Some('"'), '\\') => escaped = true,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, '#') if word_start => out.push('\\'),
                (None, _) => {}
            }
        }
        word_start = !literal && quote.is_none() && matches!(c, ' ' | '\t' | '\n');
        out.push(c);
    }
    out
}

/// Build the detached, self-removing stream container launch.
pub fn build_run_spec(settings: &Settings) -> Result<RunSpec, StreamError> {
    Ok(RunSpec {
        name: settings.docker_container.clone(),
        image: settings.docker_image.clone(),
        command: render_command(settings)?,
        detach: true,
        privileged: true,
        devices: vec![ENCODER_DEVICE.to_string()],
        auto_remove: true,
        network_mode: NETWORK_MODE.to_string(),
    })
}
