//! Stream command construction: orientation filters, keyframe interval and the
//! typed command template that becomes the container's argument vector.

mod command;
mod filter;
mod params;
mod template;

pub use command::{ENCODER_DEVICE, NETWORK_MODE, StreamError, build_run_spec, render_command};
pub use filter::{Filter, FilterChain};
pub use params::{StreamParams, gop_size};
pub use template::{CommandTemplate, Field, TemplateError};
