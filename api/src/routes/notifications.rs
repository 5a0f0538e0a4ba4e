//! WebSocket channel pushing order events to the connected account

use actix_web::{rt, web, HttpRequest, HttpResponse};
use actix_ws::{Message, MessageStream, Session};
use futures_util::StreamExt;

use sf_core::services::notification::Subscription;

use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

const PONG: &str = r#"{"type":"pong"}"#;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(connect).wrap(JwtAuth::new()));
}

/// Handler for GET /ws
pub async fn connect(
    req: HttpRequest,
    body: web::Payload,
    caller: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, stream) = actix_ws::handle(&req, body)?;
    let subscription = state.notifications.subscribe(caller.id);

    log::info!("Notification channel opened for {}", caller.login);
    rt::spawn(relay(session, stream, subscription, caller.id));
    Ok(response)
}

fn is_ping(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| value.get("type").and_then(|t| t.as_str()).map(|t| t == "ping"))
        .unwrap_or(false)
}

async fn relay(
    mut session: Session,
    mut stream: MessageStream,
    mut subscription: Subscription,
    user_id: i64,
) {
    loop {
        tokio::select! {
            event = subscription.next() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        log::error!("Failed to encode notification: {}", e);
                        continue;
                    }
                };
                if session.text(text).await.is_err() {
                    break;
                }
            }
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) if is_ping(&text) => {
                    if session.text(PONG).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(reason))) => {
                    log::debug!("Notification channel closed by client {}", user_id);
                    let _ = session.close(reason).await;
                    return;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    log::debug!("Notification channel error for {}: {}", user_id, e);
                    break;
                }
                None => break,
            },
        }
    }

    let _ = session.close(None).await;
    log::debug!("Notification channel ended for {}", user_id);
}
