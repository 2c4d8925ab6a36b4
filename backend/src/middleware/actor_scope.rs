//! Middleware running each request inside its own actor scope.
//!
//! The acting user is resolved from the incoming request and bound with
//! [`ActorContext::scope_with`] for the lifetime of the handler future.
//! Requests without a resolvable actor still run, inside an empty scope,
//! so handlers may bind an actor themselves with
//! [`ActorContext::set_current`].

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, InvalidHeaderName};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::config::DEFAULT_ACTOR_HEADER;
use crate::domain::{ActorContext, ActorId};

/// Extracts the acting user from an incoming request.
pub trait ActorResolver: Send + Sync {
    /// Actor the request acts for, if one can be determined.
    fn resolve(&self, req: &ServiceRequest) -> Option<ActorId>;
}

/// Reads the actor identifier from a request header.
///
/// Missing headers resolve to no actor. Malformed values, and ids reserved
/// for the system actor, are logged and also resolve to no actor.
#[derive(Debug, Clone)]
pub struct HeaderActorResolver {
    header: HeaderName,
}

impl HeaderActorResolver {
    /// Resolve actors from `header`.
    ///
    /// # Errors
    /// Returns [`InvalidHeaderName`] when `header` is not a valid name.
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::try_from(header)?,
        })
    }
}

impl Default for HeaderActorResolver {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(DEFAULT_ACTOR_HEADER),
        }
    }
}

impl ActorResolver for HeaderActorResolver {
    fn resolve(&self, req: &ServiceRequest) -> Option<ActorId> {
        let value = req.headers().get(&self.header)?;
        let Ok(raw) = value.to_str() else {
            warn!(header = %self.header, "ignoring non-ASCII actor header");
            return None;
        };
        match raw.parse::<ActorId>() {
            Ok(actor) => Some(actor),
            Err(error) => {
                warn!(
                    header = %self.header,
                    kind = error.kind(),
                    %error,
                    "ignoring unusable actor header"
                );
                None
            }
        }
    }
}

/// Middleware factory binding the resolved actor to each request task.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::ActorScope;
///
/// let app = App::new().wrap(ActorScope::default());
/// ```
#[derive(Clone)]
pub struct ActorScope {
    resolver: Arc<dyn ActorResolver>,
}

impl ActorScope {
    /// Wrap requests using `resolver` to find the actor.
    pub fn new(resolver: impl ActorResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

impl Default for ActorScope {
    fn default() -> Self {
        Self::new(HeaderActorResolver::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for ActorScope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ActorScopeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ActorScopeMiddleware {
            service: Rc::new(service),
            resolver: Arc::clone(&self.resolver),
        }))
    }
}

/// Service wrapper produced by [`ActorScope`].
pub struct ActorScopeMiddleware<S> {
    service: Rc<S>,
    resolver: Arc<dyn ActorResolver>,
}

impl<S, B> Service<ServiceRequest> for ActorScopeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let actor = self.resolver.resolve(&req);
        let service = Rc::clone(&self.service);
        let fut = async move { service.call(req).await };
        Box::pin(scoped(actor, fut))
    }
}

async fn scoped<Fut>(actor: Option<ActorId>, fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    match actor {
        Some(actor) => ActorContext::scope_with(actor, fut).await,
        None => ActorContext::scope(fut).await,
    }
}
