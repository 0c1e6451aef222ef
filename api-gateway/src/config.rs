//! Gateway configuration

use anyhow::Result;
use medevac_common::DEFAULT_RANKING_TIMEOUT_SECS;
use medevac_ranking::{arbiter::DEFAULT_ARBITER_URL, ArbiterConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Gateway service configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Remote ranking settings
    pub arbiter: ArbiterSettings,
    /// JSON `{item: cost}` file replacing the built-in price list
    pub cost_table_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ArbiterSettings {
    /// When false every evaluation is ranked by the local heuristic
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ArbiterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_ARBITER_URL.to_string(),
            timeout_secs: DEFAULT_RANKING_TIMEOUT_SECS,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            arbiter: ArbiterSettings::default(),
            cost_table_path: None,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(Self::from_vars(|key| std::env::var(key).ok()))
    }

    /// Build from a variable lookup; unparseable values keep the default
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        // Platform PORT first, MEDEVAC_PORT wins when both are set
        if let Some(p) = var("PORT").and_then(|v| v.parse::<u16>().ok()) {
            cfg.port = p;
        }
        if let Some(host) = var("MEDEVAC_HOST") {
            cfg.host = host;
        }
        if let Some(p) = var("MEDEVAC_PORT").and_then(|v| v.parse::<u16>().ok()) {
            cfg.port = p;
        }

        if let Some(url) = var("ARBITER_URL") {
            cfg.arbiter.url = url;
        }
        if let Some(enabled) = var("ARBITER_ENABLED").and_then(|v| parse_bool(&v)) {
            cfg.arbiter.enabled = enabled;
        }
        if let Some(secs) = var("ARBITER_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            if secs > 0 {
                cfg.arbiter.timeout_secs = secs;
            }
        }

        if let Some(path) = var("MEDEVAC_COST_TABLE").filter(|p| !p.trim().is_empty()) {
            cfg.cost_table_path = Some(PathBuf::from(path));
        }

        cfg
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn arbiter_config(&self) -> ArbiterConfig {
        ArbiterConfig {
            url: self.arbiter.url.clone(),
            timeout: Duration::from_secs(self.arbiter.timeout_secs),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> GatewayConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[]);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert!(cfg.arbiter.enabled);
        assert_eq!(cfg.arbiter.url, DEFAULT_ARBITER_URL);
        assert_eq!(cfg.arbiter_config().timeout, Duration::from_secs(30));
        assert!(cfg.cost_table_path.is_none());
    }

    #[test]
    fn test_prefixed_port_overrides_platform_port() {
        assert_eq!(load(&[("PORT", "9000")]).port, 9000);
        assert_eq!(load(&[("PORT", "9000"), ("MEDEVAC_PORT", "9100")]).port, 9100);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = load(&[
            ("PORT", "not-a-port"),
            ("ARBITER_ENABLED", "maybe"),
            ("ARBITER_TIMEOUT_SECS", "0"),
            ("MEDEVAC_COST_TABLE", "  "),
        ]);
        assert_eq!(cfg.port, 8080);
        assert!(cfg.arbiter.enabled);
        assert_eq!(cfg.arbiter.timeout_secs, 30);
        assert!(cfg.cost_table_path.is_none());
    }

    #[test]
    fn test_arbiter_overrides() {
        let cfg = load(&[
            ("ARBITER_URL", "http://localhost:9999/compare"),
            ("ARBITER_ENABLED", "off"),
            ("ARBITER_TIMEOUT_SECS", "5"),
            ("MEDEVAC_COST_TABLE", "/etc/medevac/costs.json"),
        ]);
        assert!(!cfg.arbiter.enabled);
        assert_eq!(cfg.arbiter_config().url, "http://localhost:9999/compare");
        assert_eq!(cfg.arbiter_config().timeout, Duration::from_secs(5));
        assert_eq!(cfg.cost_table_path, Some(PathBuf::from("/etc/medevac/costs.json")));
    }
}
