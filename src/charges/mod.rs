/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Charge resolution
//!
//! Each atom's charge comes from the first source that applies, in priority
//! order: the user config, the charges carried by the structure file, then
//! the fallback policy. The fallback is an explicit choice between the
//! element default table and zero-fill.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

static ZEOLITE_DEFAULTS: Lazy<ChargeTable> =
    Lazy::new(|| ChargeTable::from_pairs(&[("Si", 1.5), ("O", -0.75)]));

/// Where a resolved charge came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargeSource {
    /// User configuration
    Config,
    /// Charges carried by the structure file
    StructureNative,
    /// Built-in element defaults
    Default,
    /// Nothing applied; value is 0.0
    Unresolved,
}

impl ChargeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeSource::Config => "config",
            ChargeSource::StructureNative => "structure-native",
            ChargeSource::Default => "default",
            ChargeSource::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for ChargeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with atoms that neither the config nor the structure covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePolicy {
    /// Look the symbol up in the default table (unknown symbols get 0.0)
    #[default]
    ElementDefaults,
    /// Assign 0.0 and mark the charge as unresolved
    ZeroFill,
}

/// Immutable element → charge table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChargeTable {
    charges: BTreeMap<String, f64>,
}

impl ChargeTable {
    /// Build a table from `(symbol, charge)` pairs
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            charges: pairs
                .iter()
                .map(|(symbol, charge)| (symbol.to_string(), *charge))
                .collect(),
        }
    }

    /// Framework defaults for siliceous zeolites: Si 1.5, O -0.75
    pub fn zeolite_defaults() -> &'static ChargeTable {
        &ZEOLITE_DEFAULTS
    }

    /// Charge for `symbol`, if listed
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.charges.get(symbol).copied()
    }

    /// Charge for `symbol`, 0.0 when not listed
    pub fn charge_or_zero(&self, symbol: &str) -> f64 {
        self.get(symbol).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }
}

/// A charge value together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedCharge {
    pub value: f64,
    pub source: ChargeSource,
}

impl ResolvedCharge {
    pub fn new(value: f64, source: ChargeSource) -> Self {
        Self { value, source }
    }
}

/// Resolve the charge of one atom.
///
/// `structure_charge` is only honoured when `native_complete` is set, i.e.
/// when the structure carried a charge for every atom.
pub fn resolve_charge(
    symbol: &str,
    config_charges: &BTreeMap<String, f64>,
    structure_charge: Option<f64>,
    native_complete: bool,
    defaults: &ChargeTable,
    policy: ChargePolicy,
) -> ResolvedCharge {
    if let Some(&value) = config_charges.get(symbol) {
        return ResolvedCharge::new(value, ChargeSource::Config);
    }

    if native_complete {
        if let Some(value) = structure_charge {
            return ResolvedCharge::new(value, ChargeSource::StructureNative);
        }
    }

    match policy {
        ChargePolicy::ElementDefaults => {
            ResolvedCharge::new(defaults.charge_or_zero(symbol), ChargeSource::Default)
        }
        ChargePolicy::ZeroFill => ResolvedCharge::new(0.0, ChargeSource::Unresolved),
    }
}

/// Charge resolver bound to one config, one default table and one policy
#[derive(Debug, Clone)]
pub struct ChargeResolver {
    config_charges: BTreeMap<String, f64>,
    defaults: ChargeTable,
    policy: ChargePolicy,
}

impl ChargeResolver {
    pub fn new(
        config_charges: BTreeMap<String, f64>,
        defaults: ChargeTable,
        policy: ChargePolicy,
    ) -> Self {
        Self {
            config_charges,
            defaults,
            policy,
        }
    }

    /// Resolver with zeolite defaults and no config charges
    pub fn with_policy(policy: ChargePolicy) -> Self {
        Self::new(
            BTreeMap::new(),
            ChargeTable::zeolite_defaults().clone(),
            policy,
        )
    }

    pub fn policy(&self) -> ChargePolicy {
        self.policy
    }

    pub fn resolve(
        &self,
        symbol: &str,
        structure_charge: Option<f64>,
        native_complete: bool,
    ) -> ResolvedCharge {
        resolve_charge(
            symbol,
            &self.config_charges,
            structure_charge,
            native_complete,
            &self.defaults,
            self.policy,
        )
    }
}
