use crate::endpoint::Endpoint;
use crate::error::BidgateError;
use serde::{Deserialize, Serialize};

/// Capture specification for the HTTP interaction logger.
///
/// Every field except `limit` is an optional conjunctive filter — unset
/// means "match any interaction". Installed through the Admin API and
/// immutable once installed; a new install always replaces the old spec
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpLogSpec {
    /// Only capture interactions served by this endpoint.
    #[serde(default)]
    pub endpoint: Option<Endpoint>,

    /// Only capture interactions that produced this HTTP status.
    #[serde(default)]
    pub status_code: Option<u16>,

    /// Only capture interactions resolved to this account. An interaction
    /// with no resolved account never matches a set account filter.
    #[serde(default)]
    pub account: Option<String>,

    /// Number of interactions to capture before the spec self-expires.
    /// Must be at least 1.
    pub limit: u64,
}

impl HttpLogSpec {
    /// Check the spec against install-time bounds.
    ///
    /// `max_limit` comes from `logging.http_interaction.max_limit` and keeps
    /// a mistyped limit from turning diagnostic capture into full-traffic
    /// logging.
    pub fn validate(&self, max_limit: u64) -> Result<(), BidgateError> {
        if self.limit == 0 {
            return Err(BidgateError::InvalidLogSpec(
                "limit must be at least 1".to_string(),
            ));
        }
        if self.limit > max_limit {
            return Err(BidgateError::InvalidLogSpec(format!(
                "limit {} exceeds configured maximum {}",
                self.limit, max_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_spec_has_all_wildcards() {
        let spec: HttpLogSpec = serde_json::from_str(r#"{"limit":5}"#).unwrap();
        assert!(spec.endpoint.is_none());
        assert!(spec.status_code.is_none());
        assert!(spec.account.is_none());
        assert_eq!(spec.limit, 5);
    }

    #[test]
    fn full_spec_deserializes() {
        let json = r#"{"endpoint":"auction","status_code":500,"account":"1001","limit":10}"#;
        let spec: HttpLogSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.endpoint, Some(Endpoint::Auction));
        assert_eq!(spec.status_code, Some(500));
        assert_eq!(spec.account.as_deref(), Some("1001"));
        assert_eq!(spec.limit, 10);
    }

    #[test]
    fn missing_limit_is_rejected() {
        let err = serde_json::from_str::<HttpLogSpec>(r#"{"endpoint":"amp"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn validate_rejects_zero_limit() {
        let spec: HttpLogSpec = serde_json::from_str(r#"{"limit":0}"#).unwrap();
        let err = spec.validate(100).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn validate_rejects_limit_above_maximum() {
        let spec: HttpLogSpec = serde_json::from_str(r#"{"limit":101}"#).unwrap();
        assert!(spec.validate(100).is_err());
    }

    #[test]
    fn validate_accepts_limit_bounds() {
        for limit in [1u64, 50, 100] {
            let spec = HttpLogSpec {
                endpoint: None,
                status_code: None,
                account: None,
                limit,
            };
            assert!(spec.validate(100).is_ok(), "limit {limit} must be accepted");
        }
    }

    #[test]
    fn serde_roundtrip() {
        let spec = HttpLogSpec {
            endpoint: Some(Endpoint::Amp),
            status_code: Some(204),
            account: Some("acct-7".into()),
            limit: 3,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: HttpLogSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
