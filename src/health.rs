//! Liveness and readiness probes.
//!
//! | Probe | Path | Answer |
//! |---|---|---|
//! | Liveness | `/healthz` | `{"success":true,"result":{"status":"ok"}}` |
//! | Readiness | `/readyz` | `{"success":true,"result":{"status":"ready"}}` |
//!
//! The service holds no connections or caches that need warming, so ready
//! and alive are the same thing here.

use serde::Serialize;

use crate::error::ToolError;
use crate::Request;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Probe {
    pub status: &'static str,
}

pub async fn liveness(_req: Request) -> Result<Probe, ToolError> {
    Ok(Probe { status: "ok" })
}

pub async fn readiness(_req: Request) -> Result<Probe, ToolError> {
    Ok(Probe { status: "ready" })
}
