//! League of Legends statistics, fetched through a rate-limited batch
//! fetcher that degrades gracefully: throttled calls are retried, failed
//! calls are skipped, and whatever data survives is aggregated and shown.

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod fetcher;

pub use config::Config;
pub use error::AppError;
pub use fetcher::{Fetch, FetchError, FetchOutcome, FetcherConfig, OutcomeStatus, RateLimitedFetcher};
