//! Admin re-verification middleware.
//!
//! Unlike [`super::JwtAuth`], this guard ignores the role carried by the
//! token: it re-loads the account and requires the stored role to be admin.
//! A lookup failure or vanished account is 401, a non-admin account 403.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use sf_core::services::auth::{Authorizer, Identity};

use super::auth::{authorization_header, reject, AuthContext};
use crate::handlers::ApiError;

/// Factory for the fresh-admin guard
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminOnly;

impl AdminOnly {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminOnly
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminOnlyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminOnlyMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminOnlyMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminOnlyMiddleware<S>
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

            let header = authorization_header(req.request()).map(str::to_owned);
            match authorizer.require_fresh_admin(header.as_deref()).await {
                Ok(admin) => {
                    req.extensions_mut()
                        .insert(AuthContext(Identity::from(&admin)));
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(rejection) => {
                    log::info!("Admin route {} refused: {}", req.path(), rejection);
                    Ok(reject(req, rejection.into()))
                }
            }
        })
    }
}
