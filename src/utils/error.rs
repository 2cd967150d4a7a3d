use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinifyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request timed out after {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("API returned error status: {status}")]
    HttpStatusError { status: reqwest::StatusCode },

    #[error("API returned an empty response body")]
    EmptyResponseError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Content is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, MinifyError>;
