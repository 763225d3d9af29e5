use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkErrorCode {
    Timeout,
    RequestFailed,
    InvalidUrl,
}

impl NetworkErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkErrorCode::Timeout => "net/timeout",
            NetworkErrorCode::RequestFailed => "net/request-failed",
            NetworkErrorCode::InvalidUrl => "net/invalid-url",
        }
    }
}

#[derive(Clone, Debug)]
pub struct NetworkError {
    pub code: NetworkErrorCode,
    message: String,
}

impl NetworkError {
    pub fn new(code: NetworkErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn is_timeout(&self) -> bool {
        self.code == NetworkErrorCode::Timeout
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for NetworkError {}

pub type NetworkResult<T> = Result<T, NetworkError>;

pub fn timed_out(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorCode::Timeout, message)
}

pub fn request_failed(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorCode::RequestFailed, message)
}

pub fn invalid_url(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorCode::InvalidUrl, message)
}
