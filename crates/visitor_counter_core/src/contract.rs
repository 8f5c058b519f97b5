use serde::{Deserialize, Serialize};

pub const COUNTER_ID: &str = "visitors";
pub const COUNTER_KEY_ATTRIBUTE: &str = "counter_id";
pub const COUNTER_VALUE_ATTRIBUTE: &str = "visitor_count";
pub const DEFAULT_TABLE_NAME: &str = "visitor-counter";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterRecord {
    pub id: String,
    pub value: u64,
}

impl CounterRecord {
    pub fn initial() -> Self {
        Self {
            id: COUNTER_ID.to_string(),
            value: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: INTERNAL_SERVER_ERROR.to_string(),
            message: message.into(),
        }
    }
}
