//! Activity log entry

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(id: i32, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
