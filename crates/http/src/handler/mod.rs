//! The handler table: dispatches a request to a callback keyed by its HTTP
//! method. A method with no registered handler simply has no entry — the
//! connection pipeline drops the connection rather than synthesizing a 404;
//! a default resource, if wanted, is a collaborator registered like any
//! other route.
//!
//! Handlers are stored as trait objects, so the trait returns a boxed future
//! rather than using `async fn` directly — a [`HandlerFn`] closure wrapper
//! and [`make_handler`] keep call sites looking like they're passing a plain
//! async function.

use crate::protocol::HandlerError;
use crate::server::{Request, Response};
use futures::future::BoxFuture;
use http::Method;
use std::collections::HashMap;
use std::error::Error;
use std::future::Future;
use std::sync::Arc;

/// Handles one request, producing the response to send back.
///
/// Implementors receive an empty [`Response`] to populate and return; the
/// connection pipeline flushes whatever the handler hands back.
pub trait Handler: Send + Sync {
    fn call<'a>(&'a self, req: Request, resp: Response) -> BoxFuture<'a, Result<Response, HandlerError>>;
}

/// Wraps a plain async function as a [`Handler`].
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut, Err> Handler for HandlerFn<F>
where
    F: Fn(Request, Response) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, Err>> + Send + 'static,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    fn call<'a>(&'a self, req: Request, resp: Response) -> BoxFuture<'a, Result<Response, HandlerError>> {
        let fut = (self.f)(req, resp);
        Box::pin(async move { fut.await.map_err(|e| HandlerError::new(e.into())) })
    }
}

/// Wraps `f` as a [`Handler`], the way a caller registers a route callback.
pub fn make_handler<F, Fut, Err>(f: F) -> HandlerFn<F>
where
    F: Fn(Request, Response) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, Err>> + Send + 'static,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    HandlerFn { f }
}

/// Maps HTTP methods to handlers. The "default resource" mentioned in the
/// data model is just a handler registered for every method a caller cares
/// about falling back to — this table itself has no implicit fallback.
#[derive(Default)]
pub struct HandlerTable {
    by_method: HashMap<Method, Arc<dyn Handler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: Method, handler: impl Handler + 'static) -> &mut Self {
        self.by_method.insert(method, Arc::new(handler));
        self
    }

    /// Looks up the handler registered for `method`, if any.
    pub fn resolve(&self, method: &Method) -> Option<Arc<dyn Handler>> {
        self.by_method.get(method).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::HeaderMap;
    use std::net::SocketAddr;

    fn sample_request(method: Method) -> Request {
        Request::new(method, "/".to_string(), "1.1".to_string(), HeaderMap::new(), Bytes::new(), "127.0.0.1:1".parse::<SocketAddr>().unwrap())
    }

    #[test]
    fn unregistered_method_resolves_to_nothing() {
        let table = HandlerTable::new();
        assert!(table.resolve(&Method::POST).is_none());
    }

    #[tokio::test]
    async fn dispatches_registered_method() {
        let mut table = HandlerTable::new();
        table.register(
            Method::GET,
            make_handler(|_req, mut resp: Response| {
                resp.set_status(http::StatusCode::OK);
                std::future::ready(Ok::<_, std::convert::Infallible>(resp))
            }),
        );

        let handler = table.resolve(&Method::GET).expect("handler registered");
        let resp = handler.call(sample_request(Method::GET), Response::new()).await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::OK);
    }
}
