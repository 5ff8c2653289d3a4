use super::Host;
use super::common::{LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::flatten::Metric;
use crate::poller::{PollSettings, Poller, delay_until_next_boundary};
use crate::sink::{GraphiteSink, MetricSink, Protocol, encode_plaintext};
use crate::source::{EsClient, HealthLevel, StatsLevel};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

const LOG_TARGET: &str = "      poll";

#[derive(Parser, Debug)]
pub struct PollArgs {
    /// Cluster hosts as `host:port`, replacing the configured list
    #[arg(value_name = "ES_HOST")]
    pub hosts: Vec<String>,

    /// Path to configuration file (default is `es2graphite.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Prefix prepended to every metric path
    #[arg(long, short = 'p', value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Graphite host name
    #[arg(long, short = 'g', value_name = "HOST")]
    pub graphite_host: Option<String>,

    /// Graphite port
    #[arg(long, short = 'o', value_name = "PORT")]
    pub graphite_port: Option<u16>,

    /// Graphite submission protocol
    #[arg(long, value_name = "PROTOCOL")]
    pub protocol: Option<Protocol>,

    /// Seconds between poll cycles
    #[arg(long, short = 'i', value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Detail level of cluster health metrics
    #[arg(long, value_name = "LEVEL")]
    pub health_level: Option<HealthLevel>,

    /// Detail level of index stats metrics (default is the health level)
    #[arg(long, value_name = "LEVEL")]
    pub stats_level: Option<StatsLevel>,

    /// Collect shard-level stats metrics (same as `--stats-level shards`)
    #[arg(long)]
    pub shard_stats: bool,

    /// Collect low-level segment metrics
    #[arg(long)]
    pub segments: bool,

    /// Print one cycle of metrics instead of sending them to Graphite
    #[arg(long, short = 'd')]
    pub dry_run: bool,

    /// Don't print metrics during a dry run
    #[arg(long, short = 's')]
    pub silent: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Write log output to this file instead of stderr (rolls over at 100 MiB, keeping 5 backups)
    #[arg(long, short = 'l', value_name = "PATH")]
    pub log_file: Option<Utf8PathBuf>,
}

/// Load the configuration and apply the command-line overrides
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the result is invalid
pub fn resolve_config(base_dir: &Utf8Path, args: &PollArgs) -> Result<Config> {
    let mut config = Config::load(base_dir, args.config.as_ref())?;

    if !args.hosts.is_empty() {
        config.hosts.clone_from(&args.hosts);
    }
    config.hosts.retain(|h| !h.trim().is_empty());

    if let Some(prefix) = &args.prefix {
        config.prefix.clone_from(prefix);
    }
    if let Some(graphite_host) = &args.graphite_host {
        config.graphite_host.clone_from(graphite_host);
    }
    if let Some(port) = args.graphite_port {
        config.graphite_port = port;
    }
    if let Some(protocol) = args.protocol {
        config.protocol = protocol;
    }
    if let Some(interval) = args.interval {
        config.interval_secs = interval;
    }
    if let Some(level) = args.health_level {
        config.health_level = level;
    }
    if let Some(level) = args.stats_level {
        config.stats_level = Some(level);
    }
    if args.shard_stats {
        config.stats_level = Some(StatsLevel::Shards);
    }
    if args.segments {
        config.segments = true;
    }

    config.validate()?;
    Ok(config)
}

/// Writes each batch to the host's output as plaintext lines
struct DryRunSink<'a, H: Host> {
    host: &'a mut H,
    silent: bool,
}

impl<H: Host> MetricSink for DryRunSink<'_, H> {
    async fn emit(&mut self, batch: &[Metric]) -> Result<()> {
        if !self.silent {
            write!(self.host.output(), "{}", encode_plaintext(batch)).into_app_err("writing metrics to output")?;
        }
        Ok(())
    }
}

pub async fn poll<H: Host>(host: &mut H, args: &PollArgs) -> Result<()> {
    init_logging(args.log_level, args.log_file.as_deref())?;

    let config = resolve_config(Utf8Path::new("."), args)?;
    let client = EsClient::new(&config.hosts, config.request_timeout())?;
    let settings = PollSettings {
        prefix: config.prefix.clone(),
        health_level: config.health_level,
        stats_level: config.effective_stats_level(),
        segments: config.segments,
    };
    let mut poller = Poller::new(client, settings);

    if args.dry_run {
        log::warn!(target: LOG_TARGET, "Metrics are not submitted, processing as a dry run");
        let mut sink = DryRunSink { host, silent: args.silent };
        let _ = poller.run_cycle(&mut sink, Utc::now().timestamp()).await?;
        return Ok(());
    }

    let mut sink = GraphiteSink::new(&config.graphite_host, config.graphite_port, config.protocol);
    log::info!(
        target: LOG_TARGET,
        "Polling {} every {}s, sending {} metrics to {}",
        config.hosts.join(", "),
        config.interval_secs,
        config.protocol,
        sink.address()
    );

    loop {
        if let Err(e) = poller.run_cycle(&mut sink, Utc::now().timestamp()).await {
            log::error!(target: LOG_TARGET, "Poll cycle failed: {e:#}");
        }

        let delay = delay_until_next_boundary(Utc::now().timestamp_millis(), config.interval_secs);
        log::debug!(target: LOG_TARGET, "Waiting {delay:.1?} until the next cycle");

        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            signal = tokio::signal::ctrl_c() => {
                signal.into_app_err("waiting for the interrupt signal")?;
                log::info!(target: LOG_TARGET, "Interrupted, shutting down");
                return Ok(());
            }
        }
    }
}
