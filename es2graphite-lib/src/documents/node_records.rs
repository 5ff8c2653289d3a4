use crate::flatten::{CycleContext, Flattened, PathSegment, SectionKind, flatten_into, normalize};
use serde_json::{Map, Value};

/// How one `_cat` document maps onto the metric namespace.
struct NodeRecordLayout {
    /// Field holding the node name.
    name_field: &'static str,

    /// Fields removed from each record before flattening.
    stripped: &'static [&'static str],

    /// Path segment placed after the node name.
    category: &'static str,

    kind: SectionKind,
}

const DISK: NodeRecordLayout = NodeRecordLayout {
    name_field: "node",
    stripped: &["node", "host", "ip"],
    category: "disk",
    kind: SectionKind::Generic,
};

const MEMORY: NodeRecordLayout = NodeRecordLayout {
    name_field: "name",
    stripped: &["name"],
    category: "memory",
    kind: SectionKind::Generic,
};

const LOAD: NodeRecordLayout = NodeRecordLayout {
    name_field: "name",
    stripped: &["name"],
    category: "os",
    kind: SectionKind::Os,
};

const THREAD_POOL: NodeRecordLayout = NodeRecordLayout {
    name_field: "host",
    stripped: &["host"],
    category: "thread_pool",
    kind: SectionKind::Generic,
};

/// Flatten `/_cat/allocation` under `<cluster>.<node>.disk`.
#[must_use]
pub fn disk_allocation(ctx: &CycleContext, doc: &Value) -> Flattened {
    flatten_records(ctx, doc, &DISK)
}

/// Flatten the heap and RAM columns of `/_cat/nodes` under `<cluster>.<node>.memory`.
#[must_use]
pub fn node_memory(ctx: &CycleContext, doc: &Value) -> Flattened {
    flatten_records(ctx, doc, &MEMORY)
}

/// Flatten the load column of `/_cat/nodes` under `<cluster>.<node>.os`.
#[must_use]
pub fn node_load(ctx: &CycleContext, doc: &Value) -> Flattened {
    flatten_records(ctx, doc, &LOAD)
}

/// Flatten `/_cat/thread_pool` under `<cluster>.<node>.thread_pool`.
#[must_use]
pub fn thread_pool(ctx: &CycleContext, doc: &Value) -> Flattened {
    flatten_records(ctx, doc, &THREAD_POOL)
}

fn flatten_records(ctx: &CycleContext, doc: &Value, layout: &NodeRecordLayout) -> Flattened {
    let mut out = Flattened::default();
    let location = format!("{}.{}", ctx.prefix(), normalize(&PathSegment::name(ctx.cluster_name())));

    let Some(records) = doc.as_array() else {
        out.malformed(location, format!("expected a list of {} records", layout.category));
        return out;
    };

    for (idx, record) in records.iter().enumerate() {
        let Some((node_name, stripped)) = record.as_object().and_then(|r| split_record(r, layout)) else {
            out.malformed(format!("{location}.{idx}"), format!("record has no '{}' field", layout.name_field));
            continue;
        };

        let path = PathSegment::tuple([ctx.cluster_name(), node_name, layout.category]);
        flatten_into(ctx, &mut out, &path, layout.kind, &Value::Object(stripped));
    }

    out
}

fn split_record<'a>(record: &'a Map<String, Value>, layout: &NodeRecordLayout) -> Option<(&'a str, Map<String, Value>)> {
    let node_name = record.get(layout.name_field)?.as_str()?;
    let stripped = record
        .iter()
        .filter(|(key, _)| !layout.stripped.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some((node_name, stripped))
}
