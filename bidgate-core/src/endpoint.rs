use serde::{Deserialize, Serialize};
use std::fmt;

/// Served endpoint kinds the capture logger can observe.
///
/// This is a closed set: an interaction always originates from exactly one
/// of these, and a capture spec may pin itself to one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// The OpenRTB auction endpoint. Full-duplex: the request body is part
    /// of the captured interaction.
    Auction,
    /// The AMP endpoint. Response-only traffic; no request body is captured.
    Amp,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Auction => f.write_str("auction"),
            Endpoint::Amp => f.write_str("amp"),
        }
    }
}
