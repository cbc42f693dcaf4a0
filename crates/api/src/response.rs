//! Shared response envelope types for API handlers.
//!
//! Mutations answer with `{ "success": true, "data": { "message": ... } }`;
//! reads return the resource JSON directly.

use serde::Serialize;

/// Standard mutation acknowledgement.
///
/// ```ignore
/// Ok(Json(ActionResponse::message("Pet created")))
/// ```
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub data: MessageData,
}

#[derive(Debug, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl ActionResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: MessageData {
                message: message.into(),
            },
        }
    }
}
