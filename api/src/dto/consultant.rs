use serde::{Deserialize, Serialize};

use sf_core::domain::entities::consultant::ConsultantMessage;

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub conversation: Vec<ConsultantMessage>,
}
