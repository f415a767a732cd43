//! Configuration structures for the extraction engine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GastoError, Result};

/// Default label used when nothing remains of the description.
pub const DEFAULT_PLACEHOLDER: &str = "Gasto sin descripción específica";

/// Main configuration for gasto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GastoConfig {
    /// Extra category keywords.
    pub keywords: KeywordConfig,

    /// Extra direction indicator phrases.
    pub indicators: IndicatorConfig,

    /// Description synthesis settings.
    pub description: DescriptionConfig,

    /// Display settings.
    pub display: DisplayConfig,
}

/// Keywords added on top of the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Category tag to extra keywords, e.g. `{"alimentacion": ["anticucho"]}`.
    pub extra: BTreeMap<String, Vec<String>>,
}

/// Indicator phrases added on top of the built-in sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Extra phrases signalling money leaving.
    pub extra_expense: Vec<String>,

    /// Extra phrases signalling money entering.
    pub extra_income: Vec<String>,
}

/// Description synthesis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionConfig {
    /// Fallback label when the cleaned text is empty.
    pub placeholder: String,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency symbol printed before amounts.
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "S/".to_string(),
        }
    }
}

impl GastoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            GastoError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GastoConfig::default();
        assert_eq!(config.description.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(config.display.currency_symbol, "S/");
        assert!(config.keywords.extra.is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GastoConfig =
            serde_json::from_str(r#"{"keywords": {"extra": {"alimentacion": ["anticucho"]}}}"#)
                .unwrap();

        assert_eq!(config.keywords.extra["alimentacion"], vec!["anticucho".to_string()]);
        assert_eq!(config.description, DescriptionConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = GastoConfig::default();
        config.indicators.extra_income.push("me depositaron".to_string());
        config.save(&path).unwrap();

        let loaded = GastoConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(GastoConfig::from_file(&path), Err(GastoError::Config(_))));
    }
}
