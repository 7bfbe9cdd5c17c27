//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. [`Router::handle`] is the
//! whole request pipeline: CORS preflight, routing, the handler itself (run
//! in its own task so a panic stays a 500), CORS headers and the access log.
//! The server calls it once per request; tests call it directly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use matchit::Router as MatchitRouter;
use tracing::error;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{cors, trace};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Outcome of matching a method + path against the route table.
pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    /// The path exists, but not for this method. Carries the methods it does accept.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    cors: bool,
    access_log: bool,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), cors: false, access_log: true }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or collides with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    /// Answer preflight requests and add `access-control-allow-origin: *`.
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Emit one `info` event per request. On by default.
    pub fn access_log(mut self, enabled: bool) -> Self {
        self.access_log = enabled;
        self
    }

    /// Runs one request through the full pipeline and returns its response.
    pub async fn handle(&self, req: Request) -> Response {
        let started = Instant::now();
        let method = req.method;
        let path = req.path.clone();

        let response = if self.cors && method == Method::Options {
            cors::preflight(&self.allowed_methods(&path))
        } else {
            self.dispatch(req).await
        };

        self.finish(method, &path, response, started)
    }

    /// Response-side middleware. The server also runs it for requests
    /// rejected before routing (oversized bodies).
    pub(crate) fn finish(
        &self,
        method: Method,
        path: &str,
        mut response: Response,
        started: Instant,
    ) -> Response {
        if self.cors {
            cors::apply(&mut response);
        }
        if self.access_log {
            trace::record(method, path, response.status, started.elapsed());
        }
        response
    }

    async fn dispatch(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Lookup::Found(handler, params) => {
                req.params = params;
                let path = req.path.clone();
                match tokio::spawn(handler.call(req)).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!(%path, "handler task failed: {e}");
                        Response::error(Status::InternalServerError, "Internal server error")
                    }
                }
            }
            Lookup::MethodNotAllowed(allowed) => {
                let allow = join_methods(&allowed);
                let mut resp = Response::error(
                    Status::MethodNotAllowed,
                    format!("Method {} not allowed for {}", req.method, req.path),
                );
                resp.push_header("allow", &allow);
                resp
            }
            Lookup::NotFound => {
                Response::error(Status::NotFound, format!("Not found: {}", req.path))
            }
        }
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        let allowed = self.allowed_methods(path);
        if allowed.is_empty() {
            Lookup::NotFound
        } else {
            Lookup::MethodNotAllowed(allowed)
        }
    }

    /// Methods with a route matching `path`, in a stable order.
    fn allowed_methods(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

pub(crate) fn join_methods(methods: &[Method]) -> String {
    methods.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ToolError;

    async fn echo_param(req: Request) -> Result<String, ToolError> {
        Ok(req.param("name").unwrap_or_default().to_owned())
    }

    async fn explode(_req: Request) -> Response {
        panic!("boom")
    }

    fn app() -> Router {
        Router::new()
            .get("/hello/{name}", echo_param)
            .post("/explode", explode)
            .access_log(false)
    }

    #[tokio::test]
    async fn routes_with_path_params() {
        let resp = app().handle(Request::new(Method::Get, "/hello/world")).await;
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.json_body().unwrap(), json!({"success": true, "result": "world"}));
    }

    #[tokio::test]
    async fn unknown_path_is_404_envelope() {
        let resp = app().handle(Request::new(Method::Get, "/nope")).await;
        assert_eq!(resp.status_code(), 404);
        assert_eq!(resp.json_body().unwrap()["success"], json!(false));
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow_header() {
        let resp = app().handle(Request::new(Method::Get, "/explode")).await;
        assert_eq!(resp.status_code(), 405);
        assert_eq!(resp.header("allow"), Some("POST"));
    }

    #[tokio::test]
    async fn panicking_handler_becomes_500() {
        let resp = app().handle(Request::new(Method::Post, "/explode")).await;
        assert_eq!(resp.status_code(), 500);
        assert_eq!(
            resp.json_body().unwrap(),
            json!({"success": false, "error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn cors_preflight_and_headers() {
        let router = app().cors(true);
        let resp = router.handle(Request::new(Method::Options, "/explode")).await;
        assert_eq!(resp.status_code(), 204);
        assert_eq!(resp.header("access-control-allow-methods"), Some("POST, OPTIONS"));

        let resp = router.handle(Request::new(Method::Get, "/hello/x")).await;
        assert_eq!(resp.header("access-control-allow-origin"), Some("*"));
    }

    #[tokio::test]
    async fn options_without_cors_is_not_special() {
        let resp = app().handle(Request::new(Method::Options, "/explode")).await;
        assert_eq!(resp.status_code(), 405);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_route_panics() {
        let _ = Router::new()
            .get("/a", echo_param)
            .get("/a", echo_param);
    }
}
