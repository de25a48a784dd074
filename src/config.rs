//! Configuration handling for the TUI

use crate::state::forms::FormSnapshot;
use crate::state::ActorRole;
use crate::verification::{DEFAULT_LATENCY, DEFAULT_TIMEOUT};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the configured role
pub const ROLE_ENV_VAR: &str = "VERIFY_TUI_ROLE";

pub const DEFAULT_CITY: &str = "Genève";
pub const DEFAULT_REGISTRY_HELP_URL: &str =
    "https://www.ge.ch/entreprises/inscription-registre-commerce";

/// Values the form starts with. Keys missing from the file keep the
/// sample business below; `null` leaves the field empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PrefillConfig {
    pub structure_name: Option<String>,
    pub business_identifier: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    /// Path of a document to attach up front
    pub document_path: Option<String>,
}

impl Default for PrefillConfig {
    fn default() -> Self {
        Self {
            structure_name: Some("Ma Structure".to_string()),
            business_identifier: Some("CHE-123.456.789".to_string()),
            street_address: Some("Rue de la Structure 1".to_string()),
            postal_code: Some("1200".to_string()),
            document_path: None,
        }
    }
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Role being verified
    pub actor_role: Option<ActorRole>,
    /// Fixed city shown on the form
    pub city: Option<String>,
    /// Commercial registry help page
    pub registry_help_url: Option<String>,
    /// Upper bound on one verification call
    pub verification_timeout_ms: Option<u64>,
    /// Delay of the simulated verification backend
    pub simulated_latency_ms: Option<u64>,
    /// Make the simulated backend reject with this reason
    pub simulated_failure: Option<String>,
    /// Directory relative document paths are resolved against
    pub document_dir: Option<PathBuf>,
    /// Initial form values
    #[serde(default)]
    pub prefill: PrefillConfig,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("ch", "verify", "verify-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply environment overrides on top of the file values
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(role) = std::env::var(ROLE_ENV_VAR) {
            self.actor_role = Some(role.parse()?);
        }
        Ok(self)
    }

    pub fn role(&self) -> ActorRole {
        self.actor_role.unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    pub fn registry_help_url(&self) -> &str {
        self.registry_help_url
            .as_deref()
            .unwrap_or(DEFAULT_REGISTRY_HELP_URL)
    }

    pub fn verification_timeout(&self) -> Duration {
        self.verification_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn simulated_latency(&self) -> Duration {
        self.simulated_latency_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LATENCY)
    }

    /// Snapshot the form starts from. The prefilled document is attached
    /// separately through the attachment adapter.
    pub fn initial_snapshot(&self) -> FormSnapshot {
        let prefill = &self.prefill;
        FormSnapshot {
            structure_name: prefill.structure_name.clone().unwrap_or_default(),
            business_identifier: prefill.business_identifier.clone().unwrap_or_default(),
            street_address: prefill.street_address.clone().unwrap_or_default(),
            postal_code: prefill.postal_code.clone().unwrap_or_default(),
            ..FormSnapshot::new(self.city())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefill_is_sample_business() {
        let snapshot = TuiConfig::default().initial_snapshot();
        assert_eq!(snapshot.structure_name, "Ma Structure");
        assert_eq!(snapshot.business_identifier, "CHE-123.456.789");
        assert_eq!(snapshot.street_address, "Rue de la Structure 1");
        assert_eq!(snapshot.postal_code, "1200");
        assert_eq!(snapshot.city, "Genève");
        assert!(snapshot.document_proof.is_none());
    }

    #[test]
    fn test_partial_prefill_keeps_other_defaults() {
        let json = r#"{"prefill": {"postal_code": "1227", "street_address": null}}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        let snapshot = parsed.initial_snapshot();
        assert_eq!(snapshot.postal_code, "1227");
        assert_eq!(snapshot.street_address, "");
        assert_eq!(snapshot.structure_name, "Ma Structure");
    }

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert_eq!(config.role(), ActorRole::Restaurant);
        assert_eq!(config.city(), "Genève");
        assert_eq!(config.registry_help_url(), DEFAULT_REGISTRY_HELP_URL);
        assert_eq!(config.verification_timeout(), Duration::from_secs(10));
        assert_eq!(config.simulated_latency(), Duration::from_secs(2));
        assert!(config.simulated_failure.is_none());
        assert_eq!(config.prefill, PrefillConfig::default());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            actor_role: Some(ActorRole::Association),
            city: Some("Carouge".to_string()),
            registry_help_url: Some("https://example.org/registry".to_string()),
            verification_timeout_ms: Some(500),
            simulated_latency_ms: Some(50),
            simulated_failure: Some("registry offline".to_string()),
            document_dir: Some(PathBuf::from("/srv/documents")),
            prefill: PrefillConfig {
                postal_code: Some("1227".to_string()),
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.role(), ActorRole::Association);
        assert_eq!(parsed.city(), "Carouge");
        assert_eq!(parsed.registry_help_url(), "https://example.org/registry");
        assert_eq!(parsed.verification_timeout(), Duration::from_millis(500));
        assert_eq!(parsed.simulated_latency(), Duration::from_millis(50));
        assert_eq!(parsed.simulated_failure.as_deref(), Some("registry offline"));
        assert_eq!(parsed.prefill.postal_code.as_deref(), Some("1227"));
        assert_eq!(parsed.document_dir, Some(PathBuf::from("/srv/documents")));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.actor_role.is_none());
        assert_eq!(parsed.prefill, PrefillConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"actor_role": "association", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.role(), ActorRole::Association);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"actor_role": "bakery"}"#;
        assert!(serde_json::from_str::<TuiConfig>(json).is_err());
    }

    #[test]
    fn test_initial_snapshot_uses_prefill_and_city() {
        let config = TuiConfig {
            city: Some("Lancy".to_string()),
            prefill: PrefillConfig {
                structure_name: Some("Ma Structure".to_string()),
                business_identifier: Some("CHE-123.456.789".to_string()),
                street_address: None,
                postal_code: None,
                document_path: None,
            },
            ..Default::default()
        };

        let snapshot = config.initial_snapshot();

        assert_eq!(snapshot.structure_name, "Ma Structure");
        assert_eq!(snapshot.business_identifier, "CHE-123.456.789");
        assert_eq!(snapshot.street_address, "");
        assert_eq!(snapshot.city, "Lancy");
        assert!(snapshot.document_proof.is_none());
    }

    #[test]
    fn test_load_returns_ok() {
        // Default config when no file exists
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
