use thiserror::Error;

/// Result type alias for zonekeeper operations
pub type Result<T> = std::result::Result<T, ZoneError>;

/// Errors that can occur when talking to the Directory or shaping its records
#[derive(Error, Debug)]
pub enum ZoneError {
    /// Request parameters were rejected before reaching the Directory
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The Directory rejected the request payload
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message from the Directory
        message: String,
    },

    /// Authentication failed - invalid, expired or missing API token
    #[error("authentication failed: {message}")]
    Unauthorized {
        /// Error message from the Directory
        message: String,
    },

    /// The token is valid but lacks permission for this resource
    #[error("permission denied: {message}")]
    Forbidden {
        /// Error message from the Directory
        message: String,
    },

    /// Zone or record not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// The mutation collides with an existing record
    #[error("conflict: {message}")]
    Conflict {
        /// Error message from the Directory
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded, {}", retry_phrase(.retry_after))]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Connection to the Directory failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Any other error response from the Directory
    #[error("directory error{}: {message}", status_suffix(.code))]
    Unknown {
        /// HTTP status code, when one was received
        code: Option<u16>,
        /// Error message from the Directory
        message: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ZoneError {
    /// Shorthand for an [`ZoneError::InvalidInput`] error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns true if repeating the whole request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication or authorization
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Forbidden { .. })
    }

    /// Returns the HTTP status code associated with this error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::RateLimited { .. } => Some(429),
            Self::Unknown { code, .. } => *code,
            _ => None,
        }
    }

    /// Operator guidance for this class of failure
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput(_) => Some("Check the request parameters and try again."),
            Self::BadRequest { .. } => {
                Some("The Directory rejected the payload; verify record type, name and content.")
            }
            Self::Unauthorized { .. } => {
                Some("Verify the API token is set, correct and not expired.")
            }
            Self::Forbidden { .. } => {
                Some("The API token lacks permission for this zone; grant DNS read/edit access.")
            }
            Self::NotFound { .. } => {
                Some("Check the zone and record identifiers; list zones or query records to find them.")
            }
            Self::Conflict { .. } => {
                Some("A matching record already exists; query records before recreating it.")
            }
            Self::RateLimited { .. } => {
                Some("Wait before sending more requests; this request was not retried.")
            }
            Self::Connection(_) | Self::Timeout(_) => {
                Some("The Directory could not be reached; retry the whole request.")
            }
            Self::Unknown { .. } | Self::Json(_) | Self::Config(_) => None,
        }
    }

    /// Human-readable description including the remediation hint
    #[must_use]
    pub fn describe(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{self}. {hint}"),
            None => self.to_string(),
        }
    }
}

fn retry_phrase(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("retry after {secs} seconds"),
        None => "retry later".to_string(),
    }
}

fn status_suffix(code: &Option<u16>) -> String {
    code.map(|c| format!(" (HTTP {c})")).unwrap_or_default()
}
