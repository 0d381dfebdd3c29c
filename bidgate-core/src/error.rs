use thiserror::Error;

/// Unified error type for Bidgate.
#[derive(Error, Debug)]
pub enum BidgateError {
    #[error("Invalid log spec: {0}")]
    InvalidLogSpec(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal: {0}")]
    Internal(String),
}

impl BidgateError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            BidgateError::InvalidLogSpec(_) => 400,
            BidgateError::Unauthorized(_) => 401,
            _ => 500,
        }
    }

    /// JSON error body.
    pub fn to_json_body(&self) -> Vec<u8> {
        let status = self.status_code();
        let msg = self.to_string();
        format!(r#"{{"error":"{}","status":{}}}"#, msg, status).into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_spec_maps_to_400() {
        let err = BidgateError::InvalidLogSpec("limit must be at least 1".into());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(BidgateError::Unauthorized("missing api key".into()).status_code(), 401);
    }

    #[test]
    fn internal_maps_to_500() {
        assert_eq!(BidgateError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn json_body_carries_message_and_status() {
        let err = BidgateError::InvalidLogSpec("limit 0".into());
        let body: serde_json::Value =
            serde_json::from_slice(&err.to_json_body()).unwrap();
        assert_eq!(body["status"], 400);
        assert_eq!(body["error"], "Invalid log spec: limit 0");
    }
}
