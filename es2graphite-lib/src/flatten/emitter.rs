use super::{ClusterStatus, Metric, MetricValue, PathSegment, SectionKind, ShardState, normalize};
use serde_json::Value;

const LOG_TARGET: &str = "   flatten";

/// Outcome of the emission policy for one scalar leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission {
    Recorded(MetricValue),
    Filtered(FilterReason),
}

/// Why a leaf produced no metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// A string that parses as neither an integer nor a float.
    Unconvertible,

    /// The `id` field of a translog section.
    TranslogId,

    /// A numeric `timestamp` field; it sets the timestamp of its section instead.
    TimestampField,

    /// A `status` label outside the cluster status table.
    UnknownStatus,

    /// A `state` label outside the shard state table.
    UnknownShardState,

    /// Null, arrays, and anything else without a numeric reading.
    NotNumeric,
}

enum Coerced<'a> {
    Number(MetricValue),
    Text(&'a str),
    Other,
}

fn parse_number(text: &str) -> Option<MetricValue> {
    let text = text.trim();
    text.parse::<i64>()
        .map(MetricValue::Int)
        .ok()
        .or_else(|| text.parse::<f64>().map(MetricValue::Float).ok())
}

fn coerce(value: &Value) -> Coerced<'_> {
    match value {
        Value::Bool(b) => Coerced::Number(MetricValue::Int(i64::from(*b))),
        Value::Number(n) => n
            .as_i64()
            .map(MetricValue::Int)
            .or_else(|| n.as_f64().map(MetricValue::Float))
            .map_or(Coerced::Other, Coerced::Number),
        Value::String(s) => parse_number(s).map_or_else(
            || {
                log::trace!(target: LOG_TARGET, "unable to convert '{s}' to a number");
                Coerced::Text(s)
            },
            Coerced::Number,
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => Coerced::Other,
    }
}

/// Decide whether and how a scalar leaf becomes a metric.
///
/// `kind` is the section the leaf lives in and `stat` its own name. Booleans become
/// 0/1 and numeric strings are parsed; `status` and `state` labels map to their
/// ordinals. Everything else is filtered with a reason.
#[must_use]
pub fn decide(kind: SectionKind, stat: &PathSegment, value: &Value) -> Emission {
    let stat_name = stat.as_name();

    if kind == SectionKind::Translog && stat_name == Some("id") {
        return Emission::Filtered(FilterReason::TranslogId);
    }

    match (coerce(value), stat_name) {
        (Coerced::Number(_), Some("timestamp")) => Emission::Filtered(FilterReason::TimestampField),
        (Coerced::Number(number), _) => Emission::Recorded(number),
        (Coerced::Text(label), Some("status")) => ClusterStatus::from_label(label).map_or(
            Emission::Filtered(FilterReason::UnknownStatus),
            |status| Emission::Recorded(MetricValue::Int(status.ordinal())),
        ),
        (Coerced::Text(label), Some("state")) => ShardState::from_label(label).map_or(
            Emission::Filtered(FilterReason::UnknownShardState),
            |state| Emission::Recorded(MetricValue::Int(state.ordinal())),
        ),
        (Coerced::Text(_), _) => Emission::Filtered(FilterReason::Unconvertible),
        (Coerced::Other, _) => Emission::Filtered(FilterReason::NotNumeric),
    }
}

/// Apply [`decide`] to a leaf and append the resulting metric, if any.
///
/// The metric path is `prefix.normalize((metric_path, stat))`.
pub fn add_metric(
    metrics: &mut Vec<Metric>,
    prefix: &str,
    kind: SectionKind,
    metric_path: &PathSegment,
    stat: PathSegment,
    value: &Value,
    timestamp: i64,
) -> Emission {
    let emission = decide(kind, &stat, value);
    if let Emission::Recorded(number) = emission {
        let path = format!("{prefix}.{}", normalize(&metric_path.nest(stat)));
        metrics.push(Metric::new(path, timestamp, number));
    }

    emission
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stat(name: &str) -> PathSegment {
        PathSegment::name(name)
    }

    #[test]
    fn test_status_label_maps_to_ordinal() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("status"), &json!("yellow")),
            Emission::Recorded(MetricValue::Int(1))
        );
    }

    #[test]
    fn test_unknown_status_is_filtered() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("status"), &json!("unknown")),
            Emission::Filtered(FilterReason::UnknownStatus)
        );
    }

    #[test]
    fn test_shard_state_label_maps_to_ordinal() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("state"), &json!("RELOCATED")),
            Emission::Recorded(MetricValue::Int(3))
        );
        assert_eq!(
            decide(SectionKind::Generic, &stat("state"), &json!("MOVING")),
            Emission::Filtered(FilterReason::UnknownShardState)
        );
    }

    #[test]
    fn test_status_labels_only_apply_to_their_stat() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("state"), &json!("green")),
            Emission::Filtered(FilterReason::UnknownShardState)
        );
        assert_eq!(
            decide(SectionKind::Generic, &stat("health"), &json!("green")),
            Emission::Filtered(FilterReason::Unconvertible)
        );
    }

    #[test]
    fn test_booleans_become_integers() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("timed_out"), &json!(true)),
            Emission::Recorded(MetricValue::Int(1))
        );
        assert_eq!(
            decide(SectionKind::Generic, &stat("timed_out"), &json!(false)),
            Emission::Recorded(MetricValue::Int(0))
        );
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("heapMax"), &json!("1073741824")),
            Emission::Recorded(MetricValue::Int(1_073_741_824))
        );
        assert_eq!(
            decide(SectionKind::Generic, &stat("load"), &json!(" 0.75 ")),
            Emission::Recorded(MetricValue::Float(0.75))
        );
    }

    #[test]
    fn test_unconvertible_string_is_filtered() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("host"), &json!("10.0.0.1")),
            Emission::Filtered(FilterReason::Unconvertible)
        );
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("count"), &json!(12)),
            Emission::Recorded(MetricValue::Int(12))
        );
        assert_eq!(
            decide(SectionKind::Generic, &stat("ratio"), &json!(0.5)),
            Emission::Recorded(MetricValue::Float(0.5))
        );
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("big"), &json!(u64::MAX)),
            Emission::Recorded(MetricValue::Float(18_446_744_073_709_551_615.0))
        );
    }

    #[test]
    fn test_timestamp_field_is_filtered() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("timestamp"), &json!(1_700_000_000_000_i64)),
            Emission::Filtered(FilterReason::TimestampField)
        );
    }

    #[test]
    fn test_translog_id_is_filtered() {
        assert_eq!(
            decide(SectionKind::Translog, &stat("id"), &json!(1_234)),
            Emission::Filtered(FilterReason::TranslogId)
        );
        assert_eq!(
            decide(SectionKind::Generic, &stat("id"), &json!(1_234)),
            Emission::Recorded(MetricValue::Int(1_234))
        );
        assert_eq!(
            decide(SectionKind::Translog, &stat("operations"), &json!(5)),
            Emission::Recorded(MetricValue::Int(5))
        );
    }

    #[test]
    fn test_null_is_filtered() {
        assert_eq!(
            decide(SectionKind::Generic, &stat("missing"), &Value::Null),
            Emission::Filtered(FilterReason::NotNumeric)
        );
    }

    #[test]
    fn test_tuple_stat_is_never_a_named_field() {
        let indexed = PathSegment::tuple(["timestamp", "0"]);
        assert_eq!(
            decide(SectionKind::Generic, &indexed, &json!(3)),
            Emission::Recorded(MetricValue::Int(3))
        );
    }

    #[test]
    fn test_add_metric_appends_normalized_path() {
        let mut metrics = Vec::new();
        let path = PathSegment::tuple(["MyCluster", "node 1", "os"]);
        let emission = add_metric(&mut metrics, "es", SectionKind::Os, &path, stat("Load"), &json!("1.25"), 100);

        assert_eq!(emission, Emission::Recorded(MetricValue::Float(1.25)));
        assert_eq!(metrics, vec![Metric::new("es.mycluster.node_1.os.load", 100, 1.25)]);
    }

    #[test]
    fn test_add_metric_filtered_appends_nothing() {
        let mut metrics = Vec::new();
        let path = PathSegment::name("prod");
        let emission = add_metric(&mut metrics, "es", SectionKind::Generic, &path, stat("status"), &json!("purple"), 100);

        assert_eq!(emission, Emission::Filtered(FilterReason::UnknownStatus));
        assert!(metrics.is_empty());
    }
}
