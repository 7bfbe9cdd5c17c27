//! # toolbox
//!
//! Stateless text, number and web utility endpoints over a small hyper-based
//! HTTP framework.
//!
//! Every tool is an `async fn(Request) -> Result<T, ToolError>`. The router
//! wraps the result in the uniform envelope:
//!
//! ```text
//! 200  {"success": true,  "result": …}
//! 400  {"success": false, "error": "…"}
//! ```
//!
//! ## Layout
//!
//! - Framework: [`Router`] (radix tree per method via [`matchit`]),
//!   [`Server`] (hyper auto HTTP/1.1 + HTTP/2, graceful shutdown),
//!   [`middleware`] (CORS, access log), [`health`] probes.
//! - Ambient: [`Config`] (defaults, `toolbox.toml`, `TOOLBOX_*` env),
//!   [`Error`] / [`ToolError`].
//! - Tools: [`tools`], with the shared [`html`] scanner and lenient
//!   [`params`] decoding.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use toolbox::{tools, Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), toolbox::Error> {
//!     let config = Config::load()?;
//!     let app = tools::router(&config)?;
//!
//!     Server::bind(config.socket_addr()?)
//!         .await?
//!         .max_body_size(config.http.max_body_size)
//!         .serve(app)
//!         .await
//! }
//! ```
//!
//! In-process, without a socket:
//!
//! ```rust
//! # async fn demo() -> Result<(), toolbox::Error> {
//! use serde_json::json;
//! use toolbox::{tools, Config, Method, Request};
//!
//! let app = tools::router(&Config::load()?)?;
//! let req = Request::new(Method::Post, "/api/tools/convert-case")
//!     .with_json(&json!({"text": "hello", "case_type": "upper"}));
//! let resp = app.handle(req).await;
//! assert_eq!(resp.json_body().unwrap()["result"], "HELLO");
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod html;
pub mod middleware;
pub mod params;
pub mod tools;

pub use config::Config;
pub use error::{Error, ToolError};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, Envelope, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
