//! CSV file sink for normalized bar series.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::ResultExt;
use tracing::info;

use crate::io::sink::{DataSink, IoSnafu, SinkError, WriteSnafu};
use crate::models::bar_series::BarSeries;

const HEADER: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

enum Target {
    /// One `{symbol}.csv` per series under this directory.
    Dir(PathBuf),
    /// Exactly one series, written to this file.
    File(PathBuf),
}

/// Writes bar series as date-indexed CSV files.
///
/// Columns: `timestamp,open,high,low,close,volume`, timestamps in RFC 3339.
/// Leading rows whose fields were never fillable (NAN) are written as empty
/// cells so consumers see the gap rather than a `NaN` token. No schema
/// versioning.
pub struct CsvBarSink {
    target: Target,
}

impl CsvBarSink {
    /// Sink that writes one `{symbol}.csv` per series into `dir`.
    pub fn into_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Dir(dir.into()),
        }
    }

    /// Sink that writes a single series to the given file path.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::File(path.into()),
        }
    }

    fn write_series(path: &Path, series: &BarSeries) -> Result<(), SinkError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context(IoSnafu)?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            WriteSnafu {
                message: format!("{}: {e}", path.display()),
            }
            .build()
        })?;

        writer.write_record(HEADER).map_err(|e| {
            WriteSnafu {
                message: e.to_string(),
            }
            .build()
        })?;

        for bar in &series.bars {
            let record = [
                bar.timestamp.to_rfc3339(),
                format_cell(bar.open),
                format_cell(bar.high),
                format_cell(bar.low),
                format_cell(bar.close),
                format_cell(bar.volume),
            ];
            writer.write_record(&record).map_err(|e| {
                WriteSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;
        }

        writer.flush().context(IoSnafu)?;
        info!(symbol = %series.symbol, path = %path.display(), rows = series.len(), "wrote CSV");
        Ok(())
    }
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

#[async_trait]
impl DataSink for CsvBarSink {
    type Output = Vec<PathBuf>;

    async fn write(&self, data: &[BarSeries]) -> Result<Self::Output, SinkError> {
        match &self.target {
            Target::Dir(dir) => {
                let mut paths = Vec::with_capacity(data.len());
                for series in data {
                    let path = dir.join(format!("{}.csv", series.symbol));
                    Self::write_series(&path, series)?;
                    paths.push(path);
                }
                Ok(paths)
            }
            Target::File(path) => {
                let [series] = data else {
                    return Err(WriteSnafu {
                        message: format!(
                            "single-file sink expects exactly one series, got {}",
                            data.len()
                        ),
                    }
                    .build());
                };
                Self::write_series(path, series)?;
                Ok(vec![path.clone()])
            }
        }
    }
}
