use super::Endpoint;
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "    source";

/// HTTP client for the monitoring API of one cluster.
#[derive(Debug, Clone)]
pub struct EsClient {
    client: reqwest::Client,
    hosts: Vec<Url>,
    next: usize,
}

impl EsClient {
    /// Create a client for `hosts`, each given as `host:port` or as a base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the host list is empty, a host is not a valid address, or the
    /// HTTP client cannot be built.
    pub fn new<S: AsRef<str>>(hosts: &[S], timeout: Duration) -> Result<Self> {
        if hosts.is_empty() {
            return Err(app_err!("at least one cluster host is required"));
        }

        let hosts = hosts.iter().map(|h| parse_host(h.as_ref())).collect::<Result<Vec<_>>>()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("es2graphite/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client, hosts, next: 0 })
    }

    /// Pick the host for the next request, rotating round-robin.
    fn next_host(&mut self) -> &Url {
        let idx = self.next % self.hosts.len();
        self.next = (idx + 1) % self.hosts.len();
        &self.hosts[idx]
    }

    /// The URL the next request for `endpoint` would go to; advances the rotation.
    pub fn url_for(&mut self, endpoint: Endpoint) -> Result<Url> {
        let path = endpoint.path_and_query();
        let host = self.next_host();
        host.join(&path).into_app_err_with(|| format!("building URL for '{path}' on {host}"))
    }

    /// Fetch and decode one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response status is not a success, or the
    /// body is not JSON.
    pub async fn fetch(&mut self, endpoint: Endpoint) -> Result<Value> {
        let url = self.url_for(endpoint)?;
        log::info!(target: LOG_TARGET, "GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("requesting {endpoint} from {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(app_err!("GET {url} returned {status}"));
        }

        response
            .json::<Value>()
            .await
            .into_app_err_with(|| format!("decoding {endpoint} document from {url}"))
    }
}

fn parse_host(host: &str) -> Result<Url> {
    let host = host.trim();
    let text = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };

    let mut url = Url::parse(&text).into_app_err_with(|| format!("invalid cluster host '{host}'"))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(app_err!("invalid cluster host '{host}'"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
