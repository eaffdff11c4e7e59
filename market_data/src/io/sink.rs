use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::bar_series::BarSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while trying to write the data.
    #[snafu(display("Failed to write data: {message}"))]
    WriteError {
        message: String,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// Destination for normalized bar series.
#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// This keeps the trait flexible: a file sink returns the paths of the
    /// created files, a database sink might return a row count.
    type Output;

    /// Writes a slice of `BarSeries` to the destination.
    async fn write(&self, data: &[BarSeries]) -> Result<Self::Output, SinkError>;
}
