//! Ping/status command models

/// Bot latency, uptime and backend reachability
#[derive(Debug)]
pub struct PingMetrics {
    pub response_roundtrip: u64,
    pub backend_latency: Option<u64>,
    pub uptime: String,
}
