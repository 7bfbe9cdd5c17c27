//! Access logging.

use std::time::Duration;

use tracing::{info, warn};

use crate::method::Method;

/// Records one finished request. `5xx` responses are logged at `warn`.
pub fn record(method: Method, path: &str, status: u16, elapsed: Duration) {
    let latency_ms = elapsed.as_secs_f64() * 1000.0;
    if status >= 500 {
        warn!(%method, path, status, latency_ms, "request");
    } else {
        info!(%method, path, status, latency_ms, "request");
    }
}
