//! Handler trait and type erasure.
//!
//! Each tool is a plain `async fn(Request) -> Result<T, ToolError>` with its
//! own concrete future type. The router stores all of them in one table, so
//! every handler is wrapped once at registration time:
//!
//! ```text
//! async fn count_chars(req: Request) -> Result<CharCount, ToolError>
//!        ↓ router.post("/api/tools/count-chars", count_chars)
//! Arc::new(FnHandler(count_chars))            ← BoxedHandler
//!        ↓ at request time
//! handler.call(req) → BoxFuture               ← one vtable call
//!        ↓
//! fut.await.into_response()                   ← envelope applied here
//! ```
//!
//! Closures work too, which is how handlers that need shared state (the image
//! extractor's HTTP client) are registered:
//!
//! ```rust,ignore
//! let extractor = Arc::new(extractor);
//! router.post("/api/tools/download-images", move |req| {
//!     let extractor = Arc::clone(&extractor);
//!     async move { extractor.handle(req).await }
//! })
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so the dispatcher can hand it to `tokio::spawn`, which
/// is what isolates a panicking handler from its connection.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Never implemented by hand. Any function or closure of the shape
///
/// ```text
/// Fn(Request) -> impl Future<Output = impl IntoResponse>
/// ```
///
/// satisfies it through the blanket impl below. The private `Sealed`
/// supertrait keeps it that way.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Bridges a concrete handler `F` to the [`ErasedHandler`] trait object.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
