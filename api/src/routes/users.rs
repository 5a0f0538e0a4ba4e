//! Account routes
//!
//! - `POST /users/register` and `POST /users/authenticate` are public
//! - `GET /users` requires a fresh admin
//! - `/users/me` acts on the caller; `/users/{id}` requires ownership

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::services::auth::ensure_owner;
use sf_shared::types::MessageResponse;

use crate::dto::user::{
    AuthenticateRequest, ProfileResponse, RegisterRequest, RegisterResponse, TokenResponse,
    UpdateUserRequest,
};
use crate::handlers::ApiResult;
use crate::middleware::{AdminOnly, AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/authenticate", web::post().to(authenticate))
        .route("", web::get().to(list_users).wrap(AdminOnly::new()))
        .route("/me", web::get().to(me).wrap(JwtAuth::new()))
        .route("/me", web::put().to(update_me).wrap(JwtAuth::new()))
        .route("/{id}", web::get().to(get_user).wrap(JwtAuth::new()))
        .route("/{id}", web::put().to(update_user).wrap(JwtAuth::new()));
}

/// Handler for POST /users/register
///
/// ## Errors
/// - 400 `Missing login or password`
/// - 409 `User already exists`
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let user = state.auth.register(request.into()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse { id: user.id }))
}

/// Handler for POST /users/authenticate
///
/// ## Errors
/// - 400 `Missing login or password`
/// - 404 `User not found`
/// - 401 `Invalid password`
pub async fn authenticate(
    state: web::Data<AppState>,
    body: web::Json<AuthenticateRequest>,
) -> ApiResult<HttpResponse> {
    let token = state.auth.authenticate(&body.login, &body.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

pub async fn list_users(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let users = state.auth.list_accounts().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn me(state: web::Data<AppState>, caller: AuthContext) -> ApiResult<HttpResponse> {
    let profile = state.auth.profile(caller.id).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: profile.user,
        addresses: profile.addresses,
    }))
}

pub async fn update_me(
    state: web::Data<AppState>,
    caller: AuthContext,
    body: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    state.auth.update_account(caller.id, request.into()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User information updated")))
}

pub async fn get_user(
    state: web::Data<AppState>,
    caller: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = state.auth.account(path.into_inner()).await?;
    ensure_owner(&caller, user.id)?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_user(
    state: web::Data<AppState>,
    caller: AuthContext,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let user = state.auth.account(path.into_inner()).await?;
    ensure_owner(&caller, user.id)?;

    state.auth.update_account(user.id, request.into()).await?;
    log::info!("Account {} updated by {}", user.id, caller.login);
    Ok(HttpResponse::Ok().json(MessageResponse::new("User information updated")))
}
