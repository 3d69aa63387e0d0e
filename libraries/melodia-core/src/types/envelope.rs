/// Response envelopes used by the backend
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Success envelope: `{ "success": true, "message": "...", "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the backend considers the call successful
    #[serde(default)]
    pub success: bool,

    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<String>,

    /// Payload
    pub data: Option<T>,
}

/// Structured error body returned on failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Machine-readable code such as `USER_ALREADY_EXISTS`
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// Server timestamp
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Per-field validation messages
    #[serde(default)]
    pub validation_errors: Option<BTreeMap<String, String>>,
}
