use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidgateConfig {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_addr")]
    pub addr: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Admin API key. When set, every admin request must present it in the
    /// `x-api-key` header.
    pub api_key: Option<String>,
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub http_interaction: HttpInteractionConfig,
}

/// Bounds for the on-demand HTTP interaction capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpInteractionConfig {
    /// Largest capture limit an operator may install.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_admin_addr() -> String { "0.0.0.0:8060".into() }
fn default_true() -> bool { true }
fn default_max_limit() -> u64 { 100 }

// ── Impls ─────────────────────────────────────────────────────

impl Default for BidgateConfig {
    fn default() -> Self {
        Self {
            admin: AdminConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            addr: default_admin_addr(),
            enabled: true,
            api_key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            http_interaction: HttpInteractionConfig::default(),
        }
    }
}

impl Default for HttpInteractionConfig {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
        }
    }
}

impl BidgateConfig {
    /// Load configuration from YAML file + env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: BidgateConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("BIDGATE_").split("_"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── Default values ────────────────────────────────────────────

    #[test]
    fn default_admin_config_has_expected_values() {
        let cfg = AdminConfig::default();
        assert_eq!(cfg.addr, "0.0.0.0:8060");
        assert!(cfg.enabled);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn default_http_interaction_limit_is_100() {
        let cfg = HttpInteractionConfig::default();
        assert_eq!(cfg.max_limit, 100);
    }

    #[test]
    fn bidgate_config_default_builds_without_panic() {
        let cfg = BidgateConfig::default();
        // Ensure nested defaults compose correctly
        assert_eq!(cfg.admin.addr, "0.0.0.0:8060");
        assert_eq!(cfg.logging.http_interaction.max_limit, 100);
    }

    // ── BidgateConfig::load() ─────────────────────────────────────

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "admin:\n  addr: \"127.0.0.1:9999\"\n  api_key: \"sekrit\"\n").unwrap();
        let cfg = BidgateConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.admin.addr, "127.0.0.1:9999");
        assert_eq!(cfg.admin.api_key.as_deref(), Some("sekrit"));
        // Defaults still apply for unspecified fields
        assert!(cfg.admin.enabled);
        assert_eq!(cfg.logging.http_interaction.max_limit, 100);
    }

    #[test]
    fn load_yaml_with_capture_bounds() {
        let yaml = r#"
logging:
  http_interaction:
    max_limit: 500
"#;
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "{yaml}").unwrap();
        let cfg = BidgateConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.logging.http_interaction.max_limit, 500);
    }

    #[test]
    fn load_from_missing_file_does_not_panic() {
        // Figment merges an absent file as empty (defaults apply) or reports
        // an error; both are acceptable here
        let result = BidgateConfig::load(Path::new("/nonexistent/bidgate.yaml"));
        if let Ok(cfg) = result {
            assert_eq!(cfg.admin.addr, "0.0.0.0:8060");
        }
    }
}
