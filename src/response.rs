//! The JSON document every PixMatch endpoint answers with.

use serde::{Deserialize, Serialize};

/// A parsed service response.
///
/// All endpoints share one envelope: a `status`, the echoed `method`
/// name, a `result` array whose element shape depends on the method
/// (match scores, filepaths, color palettes, metadata documents, …),
/// and an `error` array of human-readable messages populated when the
/// status is not [`ResponseStatus::Ok`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub status: ResponseStatus,
    pub method: String,
    #[serde(default)]
    pub result: Vec<serde_json::Value>,
    #[serde(default)]
    pub error: Vec<String>,
}

/// The outcome reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The request succeeded.
    Ok,
    /// The request succeeded with warnings (e.g. some of a batch failed).
    Warn,
    /// The request failed; `error` carries the messages.
    Fail,
}

impl ServiceResponse {
    /// `true` when the service reported `ok`.
    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}
