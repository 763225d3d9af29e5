use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheErrorCode {
    UnsupportedMethod,
    Internal,
}

impl CacheErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheErrorCode::UnsupportedMethod => "cache/unsupported-method",
            CacheErrorCode::Internal => "cache/internal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheError {
    pub code: CacheErrorCode,
    message: String,
}

impl CacheError {
    pub fn new(code: CacheErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for CacheError {}

pub type CacheResult<T> = Result<T, CacheError>;

pub fn unsupported_method(message: impl Into<String>) -> CacheError {
    CacheError::new(CacheErrorCode::UnsupportedMethod, message)
}

pub fn internal_error(message: impl Into<String>) -> CacheError {
    CacheError::new(CacheErrorCode::Internal, message)
}
