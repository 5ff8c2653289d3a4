use crate::Result;
use crate::flatten::{CycleContext, Flattened, PathSegment, SectionKind, flatten_into, flatten_section, normalize};
use crate::source::StatsLevel;
use ohno::app_err;
use serde_json::Value;

/// Extract the cluster name from a `/_cluster/health` document.
pub fn cluster_name(health: &Value) -> Result<String> {
    health
        .get("cluster_name")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| app_err!("cluster health document has no 'cluster_name'"))
}

/// Flatten `/_cluster/health` under `<cluster>`.
#[must_use]
pub fn cluster_health(ctx: &CycleContext, health: &Value) -> Flattened {
    flatten_section(ctx, &PathSegment::name(ctx.cluster_name()), SectionKind::Generic, health)
}

/// Flatten `/_stats`: the `_all` totals under `<cluster>.indices._all` and, unless only
/// cluster-level stats were requested, the per-index stats under `<cluster>.indices`.
#[must_use]
pub fn indices_stats(ctx: &CycleContext, stats: &Value, level: StatsLevel) -> Flattened {
    let mut out = Flattened::default();

    let totals = PathSegment::tuple([ctx.cluster_name(), "indices", "_all"]);
    flatten_member(ctx, &mut out, &totals, stats, "_all");

    if level != StatsLevel::Cluster {
        let indices = PathSegment::tuple([ctx.cluster_name(), "indices"]);
        flatten_member(ctx, &mut out, &indices, stats, "indices");
    }

    out
}

/// Flatten `/_segments` under `<cluster>.indices`.
#[must_use]
pub fn segments(ctx: &CycleContext, doc: &Value) -> Flattened {
    let mut out = Flattened::default();
    let indices = PathSegment::tuple([ctx.cluster_name(), "indices"]);
    flatten_member(ctx, &mut out, &indices, doc, "indices");
    out
}

fn flatten_member(ctx: &CycleContext, out: &mut Flattened, path: &PathSegment, doc: &Value, member: &str) {
    match doc.get(member) {
        Some(section) => flatten_into(ctx, out, path, SectionKind::Generic, section),
        None => out.malformed(
            format!("{}.{}", ctx.prefix(), normalize(path)),
            format!("document has no '{member}' member"),
        ),
    }
}
