use http::StatusCode;
use thiserror::Error;

/// Result type alias for notifier operations
pub type Result<T, E = NotifierError> = std::result::Result<T, E>;

/// The two downstream collaborators, named for error messages, log fields,
/// and virtual-host routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpstreamService {
    Mapper,
    StoreWriter,
}

impl UpstreamService {
    /// Logical service name carried in the `Host` header so the routing
    /// layer can direct the call, independent of the physical address.
    pub fn virtual_host(&self) -> &'static str {
        match self {
            UpstreamService::Mapper => "content-mapper",
            UpstreamService::StoreWriter => "content-store-writer",
        }
    }
}

impl std::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamService::Mapper => write!(f, "mapper"),
            UpstreamService::StoreWriter => write!(f, "store writer"),
        }
    }
}

/// Errors that can occur while relaying a notification
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("failed to read request body: {0}")]
    RequestBodyError(String),

    #[error("invalid content notification: {0}")]
    InvalidNotification(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("request to {0} failed: {1}")]
    UpstreamRequestFailed(UpstreamService, String),

    #[error("failed to read {0} response body: {1}")]
    ResponseBodyError(UpstreamService, String),

    #[error("{0} returned status {1}")]
    UnexpectedStatus(UpstreamService, StatusCode),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotifierError {
    /// Status reported to the original caller. Caller mistakes are in the
    /// 400 family, everything downstream or internal is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotifierError::RequestBodyError(_) | NotifierError::InvalidNotification(_) => {
                StatusCode::BAD_REQUEST
            }
            NotifierError::InvalidConfig(_)
            | NotifierError::UpstreamRequestFailed(_, _)
            | NotifierError::ResponseBodyError(_, _)
            | NotifierError::UnexpectedStatus(_, _)
            | NotifierError::InternalError(_)
            | NotifierError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
