use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::params::StreamParams;

/// Values a command template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    WebcamUrl,
    StreamUrl,
    FrameRate,
    GopSize,
    Filter,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::WebcamUrl,
        Field::StreamUrl,
        Field::FrameRate,
        Field::GopSize,
        Field::Filter,
    ];

    /// A command without a source or a destination cannot stream.
    pub const REQUIRED: [Field; 2] = [Field::WebcamUrl, Field::StreamUrl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::WebcamUrl => "webcam_url",
            Field::StreamUrl => "stream_url",
            Field::FrameRate => "frame_rate",
            Field::GopSize => "gop_size",
            Field::Filter => "filter",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    fn value(&self, params: &StreamParams) -> String {
        match self {
            Field::WebcamUrl => params.webcam_url.clone(),
            Field::StreamUrl => params.stream_url.clone(),
            Field::FrameRate => params.frame_rate.to_string(),
            Field::GopSize => params.gop_size.to_string(),
            Field::Filter => params.filter.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}} in command template")]
    UnknownPlaceholder(String),
    #[error("unclosed '{{' at offset {0} in command template")]
    Unclosed(usize),
    #[error("unmatched '}}' at offset {0} in command template")]
    UnmatchedBrace(usize),
    #[error("command template does not reference {0}")]
    MissingPlaceholder(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A command template checked against the closed set of [`Field`]s.
///
/// Placeholders are written `{name}`; `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    segments: Vec<Segment>,
}

impl CommandTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(offset));
                    }
                    let field = Field::from_name(&name)
                        .ok_or(TemplateError::UnknownPlaceholder(name))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => return Err(TemplateError::UnmatchedBrace(offset)),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let template = Self { segments };
        if let Some(missing) = Field::REQUIRED
            .into_iter()
            .find(|field| !template.references(*field))
        {
            return Err(TemplateError::MissingPlaceholder(missing));
        }
        Ok(template)
    }

    pub fn references(&self, field: Field) -> bool {
        self.segments.contains(&Segment::Field(field))
    }

    pub fn render(&self, params: &StreamParams) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&field.value(params)),
            }
        }
        out
    }
}

impl FromStr for CommandTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
