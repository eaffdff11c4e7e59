pub mod csv_sink;
pub mod sink;

pub use csv_sink::CsvBarSink;
pub use sink::{DataSink, SinkError};
