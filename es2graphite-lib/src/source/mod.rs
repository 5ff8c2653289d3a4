//! Access to the cluster's monitoring API
//!
//! [`Endpoint`] names each document the poller reads and knows its path and query.
//! [`EsClient`] fetches endpoints over HTTP, rotating round-robin through the
//! configured hosts so that consecutive requests spread across the cluster.

mod client;
mod endpoint;

pub use client::EsClient;
pub use endpoint::{Endpoint, HealthLevel, StatsLevel};
