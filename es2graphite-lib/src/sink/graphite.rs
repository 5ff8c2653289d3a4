use super::{MetricSink, Protocol, encode_pickle, encode_plaintext};
use crate::Result;
use crate::flatten::Metric;
use bytes::Bytes;
use ohno::IntoAppError;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

const LOG_TARGET: &str = "      sink";

/// Sends each batch to a carbon receiver over a fresh TCP connection.
#[derive(Debug, Clone)]
pub struct GraphiteSink {
    address: String,
    protocol: Protocol,
}

impl GraphiteSink {
    #[must_use]
    pub fn new(host: &str, port: u16, protocol: Protocol) -> Self {
        Self {
            address: format!("{host}:{port}"),
            protocol,
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn send(&self, payload: &[u8]) -> Result<()> {
        let mut stream = TcpStream::connect(&self.address)
            .await
            .into_app_err_with(|| format!("connecting to Graphite at {}", self.address))?;

        stream
            .write_all(payload)
            .await
            .into_app_err_with(|| format!("sending metrics to Graphite at {}", self.address))?;

        stream
            .shutdown()
            .await
            .into_app_err_with(|| format!("closing connection to Graphite at {}", self.address))
    }
}

impl MetricSink for GraphiteSink {
    async fn emit(&mut self, batch: &[Metric]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let payload = match self.protocol {
            Protocol::Plaintext => Bytes::from(encode_plaintext(batch)),
            Protocol::Pickle => encode_pickle(batch)?,
        };

        self.send(&payload).await?;
        log::debug!(target: LOG_TARGET, "sent {} metrics ({} bytes, {}) to {}", batch.len(), payload.len(), self.protocol, self.address);
        Ok(())
    }
}
