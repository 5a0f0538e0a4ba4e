use actix_web::{web, HttpResponse};

use crate::dto::consultant::{ConversationResponse, SendMessageRequest};
use crate::handlers::ApiResult;
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-message", web::post().to(send_message).wrap(JwtAuth::new()));
}

/// Handler for POST /consultant/send-message
///
/// Returns the caller's whole conversation including the new reply.
pub async fn send_message(
    state: web::Data<AppState>,
    caller: AuthContext,
    body: web::Json<SendMessageRequest>,
) -> ApiResult<HttpResponse> {
    let conversation = state.consultant.send_message(caller.id, &body.message).await?;
    Ok(HttpResponse::Ok().json(ConversationResponse { conversation }))
}
