use serde::{Deserialize, Serialize};

use crate::docker::{ContainerRef, EngineHandle, ImageRef};

/// Status message pushed to the host UI after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub status: bool,
    pub streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Notification {
    pub fn streaming(streaming: bool) -> Self {
        Self {
            status: true,
            streaming,
            success: None,
            error: None,
        }
    }

    /// A failed operation. The stream is reported as not running.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::streaming(false)
        }
    }

    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of looking the stream container up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Present(ContainerRef),
    /// The engine answered and the container does not exist.
    Absent,
    /// The engine could not be reached or the lookup failed.
    Unreachable(String),
}

impl Resolution {
    pub fn is_present(&self) -> bool {
        matches!(self, Resolution::Present(_))
    }
}

/// Copy of the controller's in-memory handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub engine: Option<EngineHandle>,
    pub image: Option<ImageRef>,
    pub container: Option<ContainerRef>,
    pub last_error: Option<String>,
}
