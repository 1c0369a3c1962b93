use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No recent games found for this player")]
    NoRecentGames,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Throttled => AppError::RateLimited,
            FetchError::Transient(msg) => AppError::HttpError(msg),
            FetchError::Permanent(msg) => AppError::ApiError(msg),
        }
    }
}
