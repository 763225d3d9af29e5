use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformErrorCode {
    WindowUnavailable,
    NotificationFailed,
    Unsupported,
}

impl PlatformErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformErrorCode::WindowUnavailable => "platform/window-unavailable",
            PlatformErrorCode::NotificationFailed => "platform/notification-failed",
            PlatformErrorCode::Unsupported => "platform/unsupported",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlatformError {
    pub code: PlatformErrorCode,
    message: String,
}

impl PlatformError {
    pub fn new(code: PlatformErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for PlatformError {}

pub type PlatformResult<T> = Result<T, PlatformError>;

pub fn window_unavailable(message: impl Into<String>) -> PlatformError {
    PlatformError::new(PlatformErrorCode::WindowUnavailable, message)
}

pub fn notification_failed(message: impl Into<String>) -> PlatformError {
    PlatformError::new(PlatformErrorCode::NotificationFailed, message)
}

pub fn unsupported(message: impl Into<String>) -> PlatformError {
    PlatformError::new(PlatformErrorCode::Unsupported, message)
}
