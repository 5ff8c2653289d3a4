//! Per-endpoint adapters from API documents to metric records
//!
//! Each adapter decides where in the metric namespace a document lands and hands the
//! relevant part of it to the flattener:
//!
//! | Document          | Metric path root                      |
//! |-------------------|---------------------------------------|
//! | cluster health    | `<cluster>`                           |
//! | disk allocation   | `<cluster>.<node>.disk`               |
//! | node memory       | `<cluster>.<node>.memory`             |
//! | node load         | `<cluster>.<node>.os`                 |
//! | thread pool       | `<cluster>.<node>.thread_pool`        |
//! | indices stats     | `<cluster>.indices._all`, `<cluster>.indices` |
//! | segments          | `<cluster>.indices`                   |
//!
//! The `_cat` documents are lists with one flat record per node. Their identifying fields
//! are stripped from the record and the node name becomes part of the path instead.

mod cluster;
mod node_records;

pub use cluster::{cluster_health, cluster_name, indices_stats, segments};
pub use node_records::{disk_allocation, node_load, node_memory, thread_pool};
