//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching time-series bar data from any market data vendor. Each concrete
//! provider (Yahoo chart API, Alpha Vantage) implements the trait and owns
//! its vendor-specific request construction and validation.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) so callers can select a provider at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data::models::{raw_table::RawBarTable, request_params::BarsRequestParams};
//! use market_data::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Vec<RawBarTable>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod alpha_vantage;
pub mod retry;
pub mod yahoo_chart;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};
use thiserror::Error;

use crate::models::{raw_table::RawBarTable, request_params::BarsRequestParams};

/// Trait for fetching time-series bar data from a market data provider.
///
/// Returns one [`RawBarTable`] per requested symbol. Tables are raw vendor
/// output; run them through [`crate::preprocess::preprocess`] before any
/// downstream computation.
#[async_trait]
pub trait DataProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<RawBarTable>, ProviderError>;
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API returned an error payload (e.g., bad symbol,
    /// exhausted quota). `retryable` distinguishes throttling/5xx from
    /// permanent rejections.
    #[error("API error: {message}")]
    Api { message: String, retryable: bool },

    /// The request parameters were invalid for this specific provider.
    #[error("Invalid parameters for provider: {0}")]
    Validation(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether a retry with backoff could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            // Network-level failures are worth retrying; a body that failed
            // to decode will not get better on a second fetch.
            ProviderError::Request(e) => !e.is_decode(),
            ProviderError::Api { retryable, .. } => *retryable,
            ProviderError::Validation(_) | ProviderError::Decode(_) => false,
        }
    }
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// A required environment variable is missing.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}
