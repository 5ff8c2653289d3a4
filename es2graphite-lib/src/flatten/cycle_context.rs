use super::NodeNames;

/// State that is fixed for the duration of one poll cycle.
///
/// Built once per cycle after the cluster health and node documents are fetched, then
/// shared by reference with every flatten call of that cycle.
#[derive(Debug, Clone)]
pub struct CycleContext {
    prefix: String,
    cluster_name: String,
    nodes: NodeNames,
    now: i64,
}

impl CycleContext {
    #[must_use]
    pub fn new(prefix: impl Into<String>, cluster_name: impl Into<String>, nodes: NodeNames, now: i64) -> Self {
        Self {
            prefix: prefix.into(),
            cluster_name: cluster_name.into(),
            nodes,
            now,
        }
    }

    /// Metric prefix, prepended verbatim to every metric path.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    #[must_use]
    pub const fn nodes(&self) -> &NodeNames {
        &self.nodes
    }

    /// Cycle start, in seconds since the epoch.
    #[must_use]
    pub const fn now(&self) -> i64 {
        self.now
    }
}
