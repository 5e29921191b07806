use super::LogRecord;
use crate::error::Result;

/// Anything able to durably record a log record.
///
/// Sinks are owned by a single channel and dropped with it; release any
/// held resources in `Drop`.
pub trait Sink: Send {
    fn write(&mut self, record: &LogRecord) -> Result<()>;
}
