//! Consultant conversation entries and search audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantMessage {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    /// `true` when written by the customer, `false` for assistant replies
    pub is_client: bool,
    pub timestamp: DateTime<Utc>,
}

/// One AI search request as recorded in `search_logs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLogEntry {
    pub user_id: i64,
    pub request_message: String,
    pub response_message: String,
    pub tokens_used: Option<u32>,
}
