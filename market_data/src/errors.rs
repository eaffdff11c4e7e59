use thiserror::Error;

use crate::io::sink::SinkError;
use crate::preprocess::SchemaError;
use crate::providers::{ProviderError, ProviderInitError};

/// The unified error type for the `market_data` crate.
///
/// Library modules return their own error enums; this wrapper exists for
/// callers that drive the whole fetch → preprocess → write pipeline and
/// want one `?`-able type.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure constructing a data provider.
    #[error(transparent)]
    ProviderInit(#[from] ProviderInitError),

    /// Failure fetching from a data provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The fetched table does not match the canonical bar schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failure writing to a data sink.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
