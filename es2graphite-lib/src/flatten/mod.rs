//! Conversion of nested status documents into flat metric records
//!
//! A status document is an arbitrarily deep tree of objects, arrays and scalars. This
//! module walks such a tree and produces `(path, timestamp, value)` records suitable for
//! a time-series store.
//!
//! # Implementation Model
//!
//! - [`PathSegment`] is the structural location of a value. Paths are built by nesting
//!   tuples as the walk descends and are resolved into a dotted string by
//!   [`normalize`].
//! - [`decide`] is the per-leaf policy: it coerces loosely-typed scalars, maps known
//!   status and shard-state labels to ordinals, and explains every value it refuses
//!   through a [`FilterReason`].
//! - [`flatten_section`] is the recursive walker. It carries the current timestamp
//!   down the tree, overriding it when an object carries a `timestamp` field, and
//!   recognizes a handful of array layouts through the [`SectionKind`] of the
//!   section it is in.
//! - [`CycleContext`] holds everything that is fixed for one poll cycle: the metric
//!   prefix, the cluster name, the node id to name table, and the cycle start time.
//!
//! The walker never fails on document content. Values it cannot use are filtered, and
//! sub-trees with an unexpected shape are skipped and reported as [`MalformedDocument`].

mod cycle_context;
mod emitter;
mod enums;
mod metric;
mod node_names;
mod path;
mod section;

pub use cycle_context::CycleContext;
pub use emitter::{Emission, FilterReason, add_metric, decide};
pub use enums::{ClusterStatus, ShardState};
pub use metric::{Metric, MetricValue};
pub use node_names::NodeNames;
pub use path::{PathSegment, normalize, normalize_name};
pub use section::{Flattened, MalformedDocument, SectionKind, flatten_into, flatten_section};
