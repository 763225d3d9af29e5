use std::fmt::{Display, Formatter};

use crate::cache::CacheError;
use crate::platform::PlatformError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerErrorCode {
    InvalidArgument,
    Internal,
    PrecacheFailed,
    ActivationFailed,
    CacheUnavailable,
    NotificationFailed,
    NoUpdatePending,
    PermissionBlocked,
    InvalidState,
}

impl WorkerErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerErrorCode::InvalidArgument => "worker/invalid-argument",
            WorkerErrorCode::Internal => "worker/internal",
            WorkerErrorCode::PrecacheFailed => "worker/precache-failed",
            WorkerErrorCode::ActivationFailed => "worker/activation-failed",
            WorkerErrorCode::CacheUnavailable => "worker/cache-unavailable",
            WorkerErrorCode::NotificationFailed => "worker/notification-failed",
            WorkerErrorCode::NoUpdatePending => "worker/no-update-pending",
            WorkerErrorCode::PermissionBlocked => "worker/permission-blocked",
            WorkerErrorCode::InvalidState => "worker/invalid-state",
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorkerError {
    pub code: WorkerErrorCode,
    message: String,
}

impl WorkerError {
    pub fn new(code: WorkerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for WorkerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for WorkerError {}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl From<CacheError> for WorkerError {
    fn from(err: CacheError) -> Self {
        cache_unavailable(err.to_string())
    }
}

impl From<PlatformError> for WorkerError {
    fn from(err: PlatformError) -> Self {
        internal_error(err.to_string())
    }
}

pub fn invalid_argument(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::InvalidArgument, message)
}

pub fn internal_error(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::Internal, message)
}

pub fn precache_failed(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::PrecacheFailed, message)
}

pub fn activation_failed(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::ActivationFailed, message)
}

pub fn cache_unavailable(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::CacheUnavailable, message)
}

pub fn notification_failed(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::NotificationFailed, message)
}

pub fn no_update_pending() -> WorkerError {
    WorkerError::new(
        WorkerErrorCode::NoUpdatePending,
        "No installed worker version is waiting to activate.",
    )
}

pub fn permission_blocked(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::PermissionBlocked, message)
}

pub fn invalid_state(message: impl Into<String>) -> WorkerError {
    WorkerError::new(WorkerErrorCode::InvalidState, message)
}
