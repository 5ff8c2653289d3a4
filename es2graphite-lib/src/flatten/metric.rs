use core::fmt;
use serde::Serialize;

/// A numeric sample value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// One time-series sample: a dotted path, a timestamp in whole seconds since the epoch,
/// and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub path: String,
    pub timestamp: i64,
    pub value: MetricValue,
}

impl Metric {
    #[must_use]
    pub fn new(path: impl Into<String>, timestamp: i64, value: impl Into<MetricValue>) -> Self {
        Self {
            path: path.into(),
            timestamp,
            value: value.into(),
        }
    }
}
