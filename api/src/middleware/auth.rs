//! Bearer-token authentication middleware for protecting API endpoints.
//!
//! The middleware reads the `Authorization` header, verifies the token with
//! the shared [`Authorizer`] and stores the caller's identity in the request
//! extensions. Rejected requests never reach the handler:
//! - no `Bearer` header: 401 `{"error": "Missing token"}`
//! - bad signature, malformed or expired token: 403 `{"error": "Invalid token"}`

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    task::{Context, Poll},
};

use sf_core::services::auth::{Authorizer, Identity, Rejection};

use crate::handlers::ApiError;

/// Caller identity injected into requests by [`JwtAuth`] or [`super::AdminOnly`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext(pub Identity);

impl Deref for AuthContext {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Raw `Authorization` header value, if it is valid text
pub fn authorization_header(req: &HttpRequest) -> Option<&str> {
    req.headers().get(AUTHORIZATION)?.to_str().ok()
}

/// Render a rejection in place of the wrapped service's response
pub(crate) fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(error.error_response()).map_into_right_body()
}

/// Bearer-token authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer-token authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(authorizer) = req.app_data::<web::Data<Authorizer>>().cloned() else {
                log::error!("Authorizer is not registered as app data");
                return Ok(reject(req, ApiError::Internal));
            };

            let outcome = authorizer.authenticate(authorization_header(req.request()));
            match outcome {
                Ok(identity) => {
                    log::debug!("Authenticated {} for {}", identity.login, req.path());
                    req.extensions_mut().insert(AuthContext(identity));
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(rejection) => {
                    log::debug!("Rejected {} {}: {}", req.method(), req.path(), rejection);
                    Ok(reject(req, rejection.into()))
                }
            }
        })
    }
}

/// Extractor for the authenticated caller
///
/// Fails with 401 `Missing token` when no auth middleware ran for the route.
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(Rejection::MissingToken).into());

        ready(result)
    }
}
