/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Options for the canonical record builder

use crate::charges::{ChargePolicy, ChargeTable};
use crate::config::ConversionConfig;
use log::warn;
use std::path::Path;

/// Default T-atom marker
pub const DEFAULT_T_ATOM: &str = "Si";

/// Builder configuration
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Symbol counted as T-atom
    pub t_atom: String,
    /// Fallback for charges not covered by config or structure
    pub charge_policy: ChargePolicy,
    /// Element defaults used by [`ChargePolicy::ElementDefaults`]
    pub default_charges: ChargeTable,
    /// Optional user config
    pub config: Option<ConversionConfig>,
    /// Problems met while loading the config, reported by the builder
    pub config_warnings: Vec<String>,
    /// Written to the unit-cell file as `output_formats` when non-empty
    pub output_formats: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            t_atom: DEFAULT_T_ATOM.to_string(),
            charge_policy: ChargePolicy::default(),
            default_charges: ChargeTable::zeolite_defaults().clone(),
            config: None,
            config_warnings: Vec::new(),
            output_formats: Vec::new(),
        }
    }
}

impl BuildOptions {
    pub fn with_policy(mut self, policy: ChargePolicy) -> Self {
        self.charge_policy = policy;
        self
    }

    pub fn with_t_atom(mut self, symbol: &str) -> Self {
        self.t_atom = symbol.to_string();
        self
    }

    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load a YAML config; failure is recorded as a warning, never an error
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        match ConversionConfig::load(path.as_ref()) {
            Ok(config) => self.config = Some(config),
            Err(e) => {
                warn!("Falling back to structure/default charges: {}", e);
                self.config_warnings.push(e.to_string());
            }
        }
        self
    }

    pub fn with_output_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_formats = formats.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert_eq!(options.t_atom, "Si");
        assert_eq!(options.charge_policy, ChargePolicy::ElementDefaults);
        assert_eq!(options.default_charges.get("O"), Some(-0.75));
        assert!(options.config.is_none());
    }

    #[test]
    fn test_missing_config_file_is_a_warning() {
        let options = BuildOptions::default().with_config_file("/nonexistent/zeoran.yaml");
        assert!(options.config.is_none());
        assert_eq!(options.config_warnings.len(), 1);
    }
}
