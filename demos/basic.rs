//! Minimal toolbox example: the framework with two hand-written tools
//! next to the built-in health probes.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -X POST http://localhost:3000/reverse -d '{"text":"hello"}'
//!   curl http://localhost:3000/greet/alice
//!   curl http://localhost:3000/healthz

use serde::Deserialize;
use toolbox::{health, params, Request, Router, Server, ToolError};

#[derive(Default, Deserialize)]
#[serde(default)]
struct ReverseParams {
    #[serde(deserialize_with = "params::text")]
    text: String,
}

#[tokio::main]
async fn main() -> Result<(), toolbox::Error> {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .cors(true)
        .post("/reverse", reverse)
        .get("/greet/{name}", greet)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    Server::bind("127.0.0.1:3000")
        .await?
        .serve(app)
        .await
}

// POST /reverse → {"success":true,"result":"olleh"}
async fn reverse(req: Request) -> Result<String, ToolError> {
    let p: ReverseParams = req.json()?;
    if p.text.is_empty() {
        return Err(ToolError::validation("text is required"));
    }
    Ok(p.text.chars().rev().collect())
}

// GET /greet/{name} → {"success":true,"result":"Hello, alice!"}
async fn greet(req: Request) -> Result<String, ToolError> {
    let name = req.param("name").unwrap_or("stranger");
    Ok(format!("Hello, {name}!"))
}
