use serde::Serialize;
use utoipa::ToSchema;

/// The `{"message": ...}` body every mutating endpoint returns.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
