use crate::Result;
use crate::flatten::{Metric, MetricValue};
use bytes::{BufMut, Bytes, BytesMut};
use clap::ValueEnum;
use core::fmt::Write;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use serde_pickle::SerOptions;
use strum::Display;

/// Wire format used to submit metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    /// One `<path> <value> <timestamp>` line per metric
    Plaintext,

    /// Length-prefixed pickled list of `(path, (timestamp, value))` tuples
    Pickle,
}

/// Render metrics as plaintext lines.
#[must_use]
pub fn encode_plaintext(metrics: &[Metric]) -> String {
    let mut out = String::new();
    for metric in metrics {
        let _ = writeln!(out, "{} {} {}", metric.path, metric.value, metric.timestamp);
    }
    out
}

/// Render metrics as a pickle batch: a 4-byte big-endian payload length followed by the
/// pickled list.
pub fn encode_pickle(metrics: &[Metric]) -> Result<Bytes> {
    let records: Vec<(&str, (i64, MetricValue))> = metrics
        .iter()
        .map(|m| (m.path.as_str(), (m.timestamp, m.value)))
        .collect();

    let payload = serde_pickle::to_vec(&records, SerOptions::new()).into_app_err("pickling metrics")?;
    let len = u32::try_from(payload.len()).into_app_err("pickled batch is too large")?;

    let mut buf = BytesMut::with_capacity(payload.len() + 4);
    buf.put_u32(len);
    buf.put_slice(&payload);
    Ok(buf.freeze())
}
