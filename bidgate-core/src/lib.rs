pub mod config;
pub mod endpoint;
pub mod error;
pub mod log_spec;

pub use config::BidgateConfig;
pub use endpoint::Endpoint;
pub use error::BidgateError;
pub use log_spec::HttpLogSpec;
