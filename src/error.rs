use thiserror::Error;

/// Failures surfaced by the simulated tools and the HTTP layer.
#[derive(Debug, Error)]
pub enum WhispererError {
    /// A required request field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Building the simulated call failed (bad URL and the like).
    #[error("{0}")]
    Simulation(String),

    /// The option is declared but has no implementation.
    #[error("{0}")]
    Unsupported(String),
}

impl WhispererError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn simulation(message: impl Into<String>) -> Self {
        Self::Simulation(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INVALID_REQUEST",
            Self::Simulation(_) => "SIMULATION_FAILED",
            Self::Unsupported(_) => "UNSUPPORTED",
        }
    }

    pub fn status(&self) -> warp::http::StatusCode {
        match self {
            Self::Validation(_) => warp::http::StatusCode::BAD_REQUEST,
            Self::Simulation(_) => warp::http::StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unsupported(_) => warp::http::StatusCode::NOT_IMPLEMENTED,
        }
    }
}

impl From<url::ParseError> for WhispererError {
    fn from(err: url::ParseError) -> Self {
        Self::Simulation(err.to_string())
    }
}

impl warp::reject::Reject for WhispererError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = WhispererError::validation("text is required");
        assert_eq!(err.status(), warp::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_REQUEST");
        assert_eq!(err.to_string(), "text is required");
    }

    #[test]
    fn url_errors_become_simulation_errors() {
        let err: WhispererError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, WhispererError::Simulation(_)));
    }
}
