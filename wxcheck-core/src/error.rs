use thiserror::Error;

/// Why a single weather check produced no report.
///
/// Transport failures, bad statuses and undecodable bodies all collapse into
/// one of these two variants at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("location could not be resolved")]
    NotFound,
    #[error("weather data is unavailable")]
    Unavailable,
}

/// Startup configuration problems. All of these are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "API key not found.\n\
         Hint: set the API_KEY environment variable or run `wxcheck configure`."
    )]
    MissingCredential,
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
