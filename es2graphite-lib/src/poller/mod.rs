//! One poll cycle, from fetch to emit
//!
//! A cycle reads the cluster health first, since it names the cluster, then the node
//! table if shard-level data will need it. With both in hand it builds the
//! [`CycleContext`] for the cycle and walks the remaining documents in a fixed order,
//! handing each document's metrics to the sink as soon as they are flattened.
//!
//! Scheduling lives in [`schedule`]: cycles start on wall-clock boundaries that are
//! multiples of the configured interval.

mod schedule;

pub use schedule::delay_until_next_boundary;

use crate::Result;
use crate::documents;
use crate::flatten::{CycleContext, Flattened, NodeNames};
use crate::sink::MetricSink;
use crate::source::{EsClient, Endpoint, HealthLevel, StatsLevel};
use std::time::Instant;

const LOG_TARGET: &str = "    poller";

/// What a poller fetches and where its metrics are rooted.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub prefix: String,
    pub health_level: HealthLevel,
    pub stats_level: StatsLevel,
    pub segments: bool,
}

/// Totals for one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub documents: usize,
    pub metrics: usize,
    pub issues: usize,
}

#[derive(Debug)]
pub struct Poller {
    client: EsClient,
    settings: PollSettings,
}

impl Poller {
    #[must_use]
    pub const fn new(client: EsClient, settings: PollSettings) -> Self {
        Self { client, settings }
    }

    /// Whether the cycle will walk shard copies, which are labelled by node name.
    const fn needs_node_names(&self) -> bool {
        matches!(self.settings.stats_level, StatsLevel::Shards) || self.settings.segments
    }

    /// Run one full cycle, timestamping records with `now` unless a document says otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be fetched or a batch cannot be emitted. Batches
    /// emitted before the failure stay emitted.
    pub async fn run_cycle<S: MetricSink>(&mut self, sink: &mut S, now: i64) -> Result<CycleSummary> {
        let mut summary = CycleSummary::default();

        let health = self.client.fetch(Endpoint::ClusterHealth(self.settings.health_level)).await?;
        let cluster_name = documents::cluster_name(&health)?;
        let nodes = self.fetch_node_names().await;
        let ctx = CycleContext::new(self.settings.prefix.clone(), cluster_name, nodes, now);

        publish(sink, &mut summary, Endpoint::ClusterHealth(self.settings.health_level), || {
            documents::cluster_health(&ctx, &health)
        })
        .await?;

        let per_node: [(Endpoint, fn(&CycleContext, &serde_json::Value) -> Flattened); 4] = [
            (Endpoint::DiskAllocation, documents::disk_allocation),
            (Endpoint::NodeMemory, documents::node_memory),
            (Endpoint::NodeLoad, documents::node_load),
            (Endpoint::ThreadPool, documents::thread_pool),
        ];

        for (endpoint, adapter) in per_node {
            let doc = self.client.fetch(endpoint).await?;
            publish(sink, &mut summary, endpoint, || adapter(&ctx, &doc)).await?;
        }

        let stats_level = self.settings.stats_level;
        if stats_level != StatsLevel::None {
            let endpoint = Endpoint::IndicesStats(stats_level);
            let doc = self.client.fetch(endpoint).await?;
            publish(sink, &mut summary, endpoint, || documents::indices_stats(&ctx, &doc, stats_level)).await?;
        }

        if self.settings.segments {
            let doc = self.client.fetch(Endpoint::Segments).await?;
            publish(sink, &mut summary, Endpoint::Segments, || documents::segments(&ctx, &doc)).await?;
        }

        log::info!(
            target: LOG_TARGET,
            "cycle for cluster '{}' done: {} documents, {} metrics, {} skipped sub-trees",
            ctx.cluster_name(),
            summary.documents,
            summary.metrics,
            summary.issues
        );

        Ok(summary)
    }

    /// Fetch the node table when it is needed; without it shard copies keep their raw ids.
    async fn fetch_node_names(&mut self) -> NodeNames {
        if !self.needs_node_names() {
            return NodeNames::default();
        }

        let nodes = self
            .client
            .fetch(Endpoint::Nodes)
            .await
            .and_then(|doc| NodeNames::from_document(&doc))
            .unwrap_or_else(|e| {
                log::warn!(target: LOG_TARGET, "Could not load node names, using node ids instead: {e:#}");
                NodeNames::default()
            });

        if nodes.is_empty() {
            log::debug!(target: LOG_TARGET, "no node names known, shard copies are labelled by node id");
        } else {
            log::debug!(target: LOG_TARGET, "resolved names for {} nodes", nodes.len());
        }
        nodes
    }
}

async fn publish<S, F>(sink: &mut S, summary: &mut CycleSummary, endpoint: Endpoint, flatten: F) -> Result<()>
where
    S: MetricSink,
    F: FnOnce() -> Flattened,
{
    let started = Instant::now();
    let flattened = flatten();
    log::debug!(
        target: LOG_TARGET,
        "flattened {endpoint} into {} metrics in {:.2?}",
        flattened.metrics.len(),
        started.elapsed()
    );

    summary.documents += 1;
    summary.metrics += flattened.metrics.len();
    summary.issues += flattened.issues.len();

    sink.emit(&flattened.metrics).await
}
