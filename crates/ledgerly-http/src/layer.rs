//! `tower` wiring for [`BearerAuth`].

use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};

use crate::bearer::BearerAuth;

// =============================================================================
// BearerAuthLayer
// =============================================================================

/// Layer that adds the stored bearer credential to every request.
///
/// ```ignore
/// let client = tower::ServiceBuilder::new()
///     .layer(BearerAuthLayer::new(auth))
///     .service(http_client);
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuthLayer {
    auth: BearerAuth,
}

impl BearerAuthLayer {
    pub fn new(auth: BearerAuth) -> Self {
        Self { auth }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            auth: self.auth.clone(),
        }
    }
}

// =============================================================================
// BearerAuthService
// =============================================================================

/// Middleware produced by [`BearerAuthLayer`].
///
/// The header is added synchronously in `call`; the inner service's future
/// and response pass through untouched.
#[derive(Debug, Clone)]
pub struct BearerAuthService<S> {
    inner: S,
    auth: BearerAuth,
}

impl<S> BearerAuthService<S> {
    pub fn new(inner: S, auth: BearerAuth) -> Self {
        Self { inner, auth }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B> Service<Request<B>> for BearerAuthService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        self.auth.apply(&mut req);
        self.inner.call(req)
    }
}
