//! TCP reachability probe for the camera endpoint

use crate::error::{ProbeError, ProbeResult};
use std::io::ErrorKind;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::{info, warn};
use url::Url;

/// Default RTSP port, used when the camera URL does not specify one
pub const DEFAULT_RTSP_PORT: u16 = 554;

/// Host and port extracted from a camera stream URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraEndpoint {
    pub host: String,
    pub port: u16,
}

impl CameraEndpoint {
    /// Parse a camera URL (e.g. `rtsp://192.168.1.20:554/stream1`)
    pub fn parse(raw: &str) -> ProbeResult<Self> {
        let url = Url::parse(raw).map_err(|e| ProbeError::InvalidUrl(e.to_string()))?;
        let host = url.host_str().ok_or(ProbeError::MissingHost)?.to_string();
        let port = url.port().unwrap_or(DEFAULT_RTSP_PORT);
        Ok(Self { host, port })
    }
}

impl std::fmt::Display for CameraEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Result classification of a reachability probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// TCP connection established
    Reachable,
    /// No answer within the timeout
    Timeout,
    /// The camera host actively refused the connection
    Refused,
    /// Some other network failure
    Unreachable(String),
}

/// Outcome of a probe plus how long it took
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub endpoint: CameraEndpoint,
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

impl ProbeReport {
    pub fn is_reachable(&self) -> bool {
        self.outcome == ProbeOutcome::Reachable
    }
}

/// Test whether the camera's streaming port accepts TCP connections.
///
/// The report is the result; log lines are advisory. Never panics.
pub async fn probe(endpoint: &CameraEndpoint, timeout: Duration) -> ProbeReport {
    info!("Testing connection to {}", endpoint);
    let start = Instant::now();
    let addr = format!("{}:{}", endpoint.host, endpoint.port);

    let outcome = match tokio::time::timeout(timeout, TcpStream::connect(&addr)).await {
        Ok(Ok(_stream)) => {
            info!(
                "Camera reachable ({}ms)",
                start.elapsed().as_millis()
            );
            ProbeOutcome::Reachable
        }
        Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
            warn!("Connection refused: port {} is closed on the camera", endpoint.port);
            ProbeOutcome::Refused
        }
        Ok(Err(e)) => {
            warn!("Network error reaching {}: {}", endpoint, e);
            ProbeOutcome::Unreachable(e.to_string())
        }
        Err(_) => {
            warn!("Connection to {} timed out after {:?}", endpoint, timeout);
            warn!("Check that this host and the camera share a network, that the camera is powered on, and that port {} is not firewalled", endpoint.port);
            ProbeOutcome::Timeout
        }
    };

    ProbeReport {
        endpoint: endpoint.clone(),
        outcome,
        elapsed: start.elapsed(),
    }
}
