//! Backend response envelope.
//!
//! Every endpoint of the Roost backend answers with
//! `{"success": bool, "data": ..., "message": "..."}`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoostError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps `data`, turning `success: false` into `RoostError::Api`.
    ///
    /// A successful envelope without `data` is also an error: callers that expect
    /// no payload should use `into_unit`.
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(RoostError::api(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| RoostError::api("Response did not include data"))
    }

    /// Checks `success` and discards any payload.
    pub fn into_unit(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(RoostError::api(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ))
        }
    }
}
