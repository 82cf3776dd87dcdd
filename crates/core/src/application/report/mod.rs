// Report formatting - turns results into protocol records

pub mod tap;
pub mod yaml;

pub use tap::TapFormatter;

use crate::domain::CheckResult;

/// Serializes a run into a streaming text report
///
/// The runner calls `header` once before any check finishes and `record`
/// once per result, in arrival order. Each returned string is written to
/// the sink in one piece.
pub trait ReportFormatter: Send {
    /// Preamble announcing `total` records
    fn header(&self, total: usize) -> String;

    /// One complete record for the `seq`-th arriving result (1-based)
    fn record(&self, seq: usize, result: &CheckResult) -> String;
}
