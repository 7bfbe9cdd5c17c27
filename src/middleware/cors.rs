//! Permissive CORS for the browser front end.
//!
//! The tools are unauthenticated and side-effect free, so any origin may
//! call them. Enabled with `http.enable_cors`.

use crate::method::Method;
use crate::response::Response;
use crate::router::join_methods;
use crate::status::Status;

const ALLOW_HEADERS: &str = "content-type";
const MAX_AGE_SECS: &str = "86400";

/// Answers an `OPTIONS` preflight for a path accepting `allowed` methods.
pub fn preflight(allowed: &[Method]) -> Response {
    if allowed.is_empty() {
        return Response::error(Status::NotFound, "Not found");
    }
    let mut methods = allowed.to_vec();
    if !methods.contains(&Method::Options) {
        methods.push(Method::Options);
    }
    Response::builder()
        .status(Status::NoContent)
        .header("access-control-allow-methods", &join_methods(&methods))
        .header("access-control-allow-headers", ALLOW_HEADERS)
        .header("access-control-max-age", MAX_AGE_SECS)
        .no_body()
}

/// Adds the allow-origin header to any response.
pub fn apply(response: &mut Response) {
    if response.header("access-control-allow-origin").is_none() {
        response.push_header("access-control-allow-origin", "*");
    }
}
