use clap::ValueEnum;
use core::fmt;
use serde::{Deserialize, Serialize};
use strum::Display;

const THREAD_POOL_COLUMNS: &str = "host,bulk.active,bulk.queue,bulk.rejected,index.active,index.queue,index.rejected,search.active,search.queue,search.rejected";

/// Detail level of the cluster health document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthLevel {
    Cluster,
    Indices,
    Shards,
}

/// Detail level of the index statistics document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatsLevel {
    /// Do not collect index statistics
    None,
    Cluster,
    Indices,
    Shards,
}

impl From<HealthLevel> for StatsLevel {
    fn from(level: HealthLevel) -> Self {
        match level {
            HealthLevel::Cluster => Self::Cluster,
            HealthLevel::Indices => Self::Indices,
            HealthLevel::Shards => Self::Shards,
        }
    }
}

/// A document served by the monitoring API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ClusterHealth(HealthLevel),
    Nodes,
    DiskAllocation,
    NodeMemory,
    NodeLoad,
    ThreadPool,
    IndicesStats(StatsLevel),
    Segments,
}

impl Endpoint {
    /// Path and query, relative to the host root.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self {
            Self::ClusterHealth(level) => format!("_cluster/health?level={level}"),
            Self::Nodes => "_nodes".to_string(),
            Self::DiskAllocation => "_cat/allocation?format=json&bytes=b".to_string(),
            Self::NodeMemory => "_cat/nodes?format=json&bytes=b&h=heapPercent,heapMax,ramPercent,ramMax,name".to_string(),
            Self::NodeLoad => "_cat/nodes?format=json&bytes=b&h=load,name".to_string(),
            Self::ThreadPool => format!("_cat/thread_pool?format=json&h={THREAD_POOL_COLUMNS}"),
            Self::IndicesStats(level) => format!("_stats?all=true&level={level}"),
            Self::Segments => "_segments".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClusterHealth(_) => "cluster health",
            Self::Nodes => "nodes",
            Self::DiskAllocation => "disk allocation",
            Self::NodeMemory => "node memory",
            Self::NodeLoad => "node load",
            Self::ThreadPool => "thread pool",
            Self::IndicesStats(_) => "indices stats",
            Self::Segments => "segments",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_path_carries_level() {
        assert_eq!(
            Endpoint::ClusterHealth(HealthLevel::Shards).path_and_query(),
            "_cluster/health?level=shards"
        );
    }

    #[test]
    fn test_stats_path_carries_level() {
        assert_eq!(
            Endpoint::IndicesStats(StatsLevel::Indices).path_and_query(),
            "_stats?all=true&level=indices"
        );
    }

    #[test]
    fn test_cat_paths_request_json() {
        for endpoint in [Endpoint::DiskAllocation, Endpoint::NodeMemory, Endpoint::NodeLoad, Endpoint::ThreadPool] {
            assert!(endpoint.path_and_query().contains("format=json"), "{endpoint}");
        }
    }

    #[test]
    fn test_thread_pool_asks_for_host_column() {
        assert!(Endpoint::ThreadPool.path_and_query().contains("h=host,bulk.active"));
    }

    #[test]
    fn test_stats_level_follows_health_level() {
        assert_eq!(StatsLevel::from(HealthLevel::Cluster), StatsLevel::Cluster);
        assert_eq!(StatsLevel::from(HealthLevel::Indices), StatsLevel::Indices);
        assert_eq!(StatsLevel::from(HealthLevel::Shards), StatsLevel::Shards);
    }
}
