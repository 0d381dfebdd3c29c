//! On-demand capture of complete HTTP interactions.
//!
//! An operator installs an [`HttpLogSpec`] through the Admin API; the
//! auction pipeline reports every finished interaction here. Matching
//! interactions are written to the `http-interaction` log target until the
//! spec's limit is reached, at which point the spec clears itself and the
//! hot path is back to a single atomic load per request.

use arc_swap::ArcSwapOption;
use bidgate_core::endpoint::Endpoint;
use bidgate_core::error::BidgateError;
use bidgate_core::log_spec::HttpLogSpec;
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Log target for captured interactions, kept separate from the gateway's
/// operational logging so sinks can route it independently.
pub const HTTP_INTERACTION_TARGET: &str = "http-interaction";

/// An installed capture spec paired with the number of interactions it has
/// captured so far. One instance per install; never reused after expiry.
#[derive(Debug)]
pub struct SpecWithCounter {
    spec: HttpLogSpec,
    logged: AtomicU64,
}

impl SpecWithCounter {
    fn new(spec: HttpLogSpec) -> Self {
        Self {
            spec,
            logged: AtomicU64::new(0),
        }
    }

    pub fn spec(&self) -> &HttpLogSpec {
        &self.spec
    }

    /// Interactions captured so far against this spec.
    pub fn logged(&self) -> u64 {
        self.logged.load(Ordering::Acquire)
    }
}

/// Sampling-gated interaction logger.
///
/// The active spec lives behind a single swappable reference, so request
/// tasks pay one atomic load when no capture is running. The limit is a
/// soft cap: matching calls that loaded the spec before it expired may each
/// still emit one line, so a concurrent burst can overshoot the limit by at
/// most the number of in-flight calls. Sequential calls never overshoot.
pub struct HttpInteractionLogger {
    active: ArcSwapOption<SpecWithCounter>,
}

impl HttpInteractionLogger {
    pub fn new() -> Self {
        Self {
            active: ArcSwapOption::const_empty(),
        }
    }

    /// Install a capture spec, replacing any active one — including one
    /// whose limit has not been reached. The counter always restarts at 0.
    pub fn install(&self, spec: HttpLogSpec) -> Result<(), BidgateError> {
        if spec.limit == 0 {
            return Err(BidgateError::InvalidLogSpec(
                "limit must be at least 1".to_string(),
            ));
        }
        self.active.store(Some(Arc::new(SpecWithCounter::new(spec))));
        Ok(())
    }

    /// Drop the active spec, if any. Idempotent.
    pub fn clear(&self) {
        self.active.store(None);
    }

    /// The active spec and its counter, or `None` when no capture is running.
    pub fn current(&self) -> Option<Arc<SpecWithCounter>> {
        self.active.load_full()
    }

    /// Report a finished auction interaction. Emits the request body as well
    /// as the response, then counts the capture. Never fails the caller.
    pub fn log_auction_interaction(
        &self,
        account: Option<&str>,
        uri: &str,
        request_body: Option<&Bytes>,
        status: u16,
        response_body: &str,
    ) {
        let Some(active) = self.matching_state(Endpoint::Auction, status, account) else {
            return;
        };

        info!(
            target: HTTP_INTERACTION_TARGET,
            url = %uri,
            request_body = %body_as_single_line(request_body),
            status,
            response_body = %response_body,
            "Captured auction interaction"
        );

        self.record_logged(&active);
    }

    /// Report a finished AMP interaction. AMP requests carry no body worth
    /// capturing, so only the response side is emitted.
    pub fn log_amp_interaction(
        &self,
        account: Option<&str>,
        uri: &str,
        status: u16,
        response_body: &str,
    ) {
        let Some(active) = self.matching_state(Endpoint::Amp, status, account) else {
            return;
        };

        info!(
            target: HTTP_INTERACTION_TARGET,
            url = %uri,
            status,
            response_body = %response_body,
            "Captured amp interaction"
        );

        self.record_logged(&active);
    }

    /// Load the active state if the interaction satisfies its filters.
    fn matching_state(
        &self,
        endpoint: Endpoint,
        status: u16,
        account: Option<&str>,
    ) -> Option<Arc<SpecWithCounter>> {
        let active = self.active.load_full()?;
        spec_matches(&active.spec, endpoint, status, account).then_some(active)
    }

    /// Count one capture against `active` and expire the spec once its limit
    /// is reached. The clear is conditional on the cell still holding this
    /// exact state, so a spec installed concurrently after our load is left
    /// untouched.
    fn record_logged(&self, active: &Arc<SpecWithCounter>) {
        let logged = active.logged.fetch_add(1, Ordering::AcqRel) + 1;
        if logged >= active.spec.limit {
            let expected = Some(Arc::clone(active));
            let _ = self.active.compare_and_swap(&expected, None);
        }
    }
}

impl Default for HttpInteractionLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an interaction satisfies every set field of `spec`. Unset fields
/// match anything; a set account filter never matches an unresolved account.
fn spec_matches(
    spec: &HttpLogSpec,
    endpoint: Endpoint,
    status: u16,
    account: Option<&str>,
) -> bool {
    spec.endpoint.is_none_or(|e| e == endpoint)
        && spec.status_code.is_none_or(|s| s == status)
        && spec.account.as_deref().is_none_or(|a| Some(a) == account)
}

/// Render a raw request body as one line with no embedded newlines.
///
/// JSON bodies are re-encoded in compact form; anything that fails to parse
/// is logged as its lossy text instead. An absent body renders empty.
fn body_as_single_line(body: Option<&Bytes>) -> String {
    let Some(body) = body else {
        return String::new();
    };
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
