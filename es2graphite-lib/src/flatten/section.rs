use super::{CycleContext, Emission, Metric, PathSegment, add_metric, normalize};
use core::fmt;
use serde_json::{Map, Value};

const LOG_TARGET: &str = "   flatten";

const LOAD_AVERAGE_STATS: [&str; 3] = ["1min_avg", "5min_avg", "15min_avg"];

/// The kind of section being walked, which selects the special array layouts.
///
/// Adapters choose the kind of the document root. Descending into an object keyed
/// `fs`, `os`, `shards` or `translog` switches to the matching kind; any other key keeps
/// the kind of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionKind {
    #[default]
    Generic,

    /// File system stats: `data` is a list of mounts.
    Fs,

    /// Operating system stats: `load_average` is a `[1m, 5m, 15m]` triple.
    Os,

    /// Shard stats: numeric keys hold one entry per shard copy.
    Shards,

    /// Translog stats: `id` is not a measurement.
    Translog,
}

impl SectionKind {
    #[must_use]
    pub fn descend(self, key: &str) -> Self {
        match key {
            "fs" => Self::Fs,
            "os" => Self::Os,
            "shards" => Self::Shards,
            "translog" => Self::Translog,
            _ => self,
        }
    }
}

/// A sub-tree that was skipped because its shape did not match what its position requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDocument {
    /// Dotted location of the skipped sub-tree.
    pub path: String,
    pub reason: String,
}

impl fmt::Display for MalformedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed document at '{}': {}", self.path, self.reason)
    }
}

/// Records produced by flattening, in traversal order, along with the sub-trees that
/// had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub metrics: Vec<Metric>,
    pub issues: Vec<MalformedDocument>,
}

impl Flattened {
    /// Record a skipped sub-tree.
    pub fn malformed(&mut self, path: String, reason: impl Into<String>) {
        let issue = MalformedDocument { path, reason: reason.into() };
        log::warn!(target: LOG_TARGET, "{issue}");
        self.issues.push(issue);
    }
}

/// Flatten `section` into a fresh set of records.
///
/// The walk starts with the cycle's timestamp; see [`flatten_into`].
#[must_use]
pub fn flatten_section(ctx: &CycleContext, metric_path: &PathSegment, kind: SectionKind, section: &Value) -> Flattened {
    let mut out = Flattened::default();
    flatten_into(ctx, &mut out, metric_path, kind, section);
    out
}

/// Flatten `section` and append its records to `out`.
///
/// Keys are visited in document order. When an object has a key named `timestamp`, its
/// value (epoch milliseconds) becomes the timestamp, in whole seconds, of every key of that
/// object and of everything beneath them, wherever the `timestamp` key sits among its
/// siblings.
pub fn flatten_into(ctx: &CycleContext, out: &mut Flattened, metric_path: &PathSegment, kind: SectionKind, section: &Value) {
    let mut walker = Walker { ctx, out };

    match section {
        Value::Object(map) => walker.walk_object(ctx.now(), kind, metric_path, map),
        _ => {
            let location = walker.location(metric_path);
            walker.out.malformed(location, "expected an object");
        }
    }
}

struct Walker<'a> {
    ctx: &'a CycleContext,
    out: &'a mut Flattened,
}

impl Walker<'_> {
    fn location(&self, metric_path: &PathSegment) -> String {
        format!("{}.{}", self.ctx.prefix(), normalize(metric_path))
    }

    fn walk_object(&mut self, inherited: i64, kind: SectionKind, metric_path: &PathSegment, section: &Map<String, Value>) {
        let timestamp = match section.get("timestamp") {
            Some(value) => epoch_millis_to_seconds(value).unwrap_or_else(|| {
                log::debug!(target: LOG_TARGET, "ignoring non-numeric timestamp under '{}'", self.location(metric_path));
                inherited
            }),
            None => inherited,
        };

        for (key, value) in section {
            match value {
                Value::Object(child) => self.walk_object(timestamp, kind.descend(key), &metric_path.nest(key), child),
                Value::Array(items) => self.walk_array(timestamp, kind, metric_path, key, items),
                _ => self.emit(timestamp, kind, metric_path, PathSegment::name(key), value),
            }
        }
    }

    fn walk_array(&mut self, timestamp: i64, kind: SectionKind, metric_path: &PathSegment, key: &str, items: &[Value]) {
        match kind {
            SectionKind::Fs if key == "data" => self.walk_mounts(timestamp, kind, metric_path, key, items),
            SectionKind::Os if key == "load_average" => self.walk_load_average(timestamp, kind, metric_path, key, items),
            SectionKind::Shards if is_shard_number(key) => self.walk_shard_copies(timestamp, kind, metric_path, key, items),
            _ => {
                for (idx, item) in items.iter().enumerate() {
                    let idx = idx.to_string();
                    if let Value::Object(child) = item {
                        self.walk_object(timestamp, kind, &metric_path.nest_pair(key, idx), child);
                    } else {
                        self.emit(timestamp, kind, metric_path, PathSegment::tuple([key, idx.as_str()]), item);
                    }
                }
            }
        }
    }

    fn walk_mounts(&mut self, timestamp: i64, kind: SectionKind, metric_path: &PathSegment, key: &str, items: &[Value]) {
        for (idx, disk) in items.iter().enumerate() {
            let mount = disk.as_object().and_then(|d| Some((d, d.get("mount")?.as_str()?)));
            match mount {
                Some((disk, mount)) => self.walk_object(timestamp, kind, &metric_path.nest_pair(key, mount), disk),
                None => {
                    let location = self.location(&metric_path.nest_pair(key, idx.to_string()));
                    self.out.malformed(location, "file system entry has no 'mount'");
                }
            }
        }
    }

    fn walk_load_average(&mut self, timestamp: i64, kind: SectionKind, metric_path: &PathSegment, key: &str, items: &[Value]) {
        if items.len() != LOAD_AVERAGE_STATS.len() {
            let location = self.location(&metric_path.nest(key));
            self.out
                .malformed(location, format!("expected 3 load averages, found {}", items.len()));
            return;
        }

        for (stat, value) in LOAD_AVERAGE_STATS.into_iter().zip(items) {
            self.emit(timestamp, kind, metric_path, PathSegment::tuple([key, stat]), value);
        }
    }

    fn walk_shard_copies(&mut self, timestamp: i64, kind: SectionKind, metric_path: &PathSegment, key: &str, items: &[Value]) {
        let nodes = self.ctx.nodes();
        for (idx, copy) in items.iter().enumerate() {
            let node_id = copy.as_object().and_then(|c| Some((c, c.get("routing")?.get("node")?.as_str()?)));
            match node_id {
                Some((copy, node_id)) => {
                    let node_name = nodes.resolve(node_id);
                    if node_name == node_id {
                        log::debug!(target: LOG_TARGET, "no name known for node '{node_id}'");
                    }
                    self.walk_object(timestamp, kind, &metric_path.nest_pair(key, node_name), copy);
                }
                None => {
                    let location = self.location(&metric_path.nest_pair(key, idx.to_string()));
                    self.out.malformed(location, "shard copy has no 'routing.node'");
                }
            }
        }
    }

    fn emit(&mut self, timestamp: i64, kind: SectionKind, metric_path: &PathSegment, stat: PathSegment, value: &Value) {
        if let Emission::Filtered(reason) = add_metric(&mut self.out.metrics, self.ctx.prefix(), kind, metric_path, stat, value, timestamp) {
            log::trace!(target: LOG_TARGET, "no metric under '{}': {reason:?}", self.location(metric_path));
        }
    }
}

fn is_shard_number(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

#[expect(clippy::cast_possible_truncation, reason = "epoch seconds fit comfortably in an i64")]
fn epoch_millis_to_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(|ms| ms.div_euclid(1000))
            .or_else(|| n.as_f64().map(|ms| (ms / 1000.0).floor() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|ms| ms.div_euclid(1000)),
        _ => None,
    }
}
