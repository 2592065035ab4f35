use crate::domain::Maturity;

/// Error surfaced at the binary boundary: a message plus the process exit code.
///
/// Exit codes:
/// - `2`: configuration or file I/O problems
/// - `4`: yield data could not be acquired (and no fallback was allowed)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures of a yield source.
///
/// Both variants are recoverable: the caller decides whether to switch to the
/// simulated source or to abort.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// The provider itself could not be used (missing credentials, client setup).
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    /// A maturity has no usable observations in the requested window.
    #[error("no {maturity} observations available from {provider}: {reason}")]
    DataUnavailable {
        provider: String,
        maturity: Maturity,
        reason: String,
    },
}

impl DataError {
    pub fn data_unavailable(provider: impl Into<String>, maturity: Maturity, reason: impl Into<String>) -> Self {
        DataError::DataUnavailable {
            provider: provider.into(),
            maturity,
            reason: reason.into(),
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::new(4, err.to_string())
    }
}
