//! Submission of metric batches to Graphite
//!
//! Graphite's carbon receiver accepts two formats: newline-delimited plaintext, and
//! pickled batches prefixed with their length. [`encode_plaintext`] and
//! [`encode_pickle`] produce those payloads and [`GraphiteSink`] ships them over TCP.
//! Anything that consumes batches implements [`MetricSink`].

mod graphite;
mod protocol;

pub use graphite::GraphiteSink;
pub use protocol::{Protocol, encode_pickle, encode_plaintext};

use crate::Result;
use crate::flatten::Metric;

/// Destination for batches of metrics.
pub trait MetricSink {
    /// Deliver one batch; batches arrive in the order their documents were flattened.
    fn emit(&mut self, batch: &[Metric]) -> impl Future<Output = Result<()>>;
}
