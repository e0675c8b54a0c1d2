//! Generator configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard alchemical setup: descriptors under `alchemical_craft/`, the
//! philosopher's stone as catalyst, coal as the secondary catalyst, and
//! sevenfold amplification of smelting rules.
//!
//! `max_amount` caps how many copies of one ingredient a synthesized rule may
//! carry. It applies to descriptor amounts and to the amplification factor.

use serde::Deserialize;
use std::path::Path;
use transmute_core::id::{DEFAULT_NAMESPACE, IdAllocator, IdentifierError};
use transmute_core::registry::TypeResolver;
use transmute_core::synth::{Catalysts, DEFAULT_AMPLIFICATION};

use crate::loader::{DataLoadError, deserialize_file, find_data_file, resolve_item};

/// Base name of the configuration file looked up by [`GeneratorConfig::discover`].
pub const CONFIG_BASE_NAME: &str = "generator";

/// Default cap on repeated ingredients: one full item stack.
pub const DEFAULT_MAX_AMOUNT: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Namespace of synthesized rule ids.
    pub namespace: String,
    /// Category tag descriptors live under; also the path prefix of rule ids.
    pub category: String,
    /// Only resources whose path ends with this are read.
    pub suffix: String,
    /// Namespace for item names written without one.
    pub default_namespace: String,
    pub catalyst: String,
    pub secondary_catalyst: String,
    /// Output count of, and ingredient repetitions in, smelting-derived rules.
    pub amplification: u32,
    /// Largest accepted descriptor amount and amplification.
    pub max_amount: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: "itemalchemy".to_string(),
            category: "alchemical_craft".to_string(),
            suffix: ".json".to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            catalyst: "itemalchemy:philosopher_stone".to_string(),
            secondary_catalyst: "minecraft:coal".to_string(),
            amplification: DEFAULT_AMPLIFICATION,
            max_amount: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl GeneratorConfig {
    /// Load from a RON, JSON, or TOML file.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        deserialize_file(path)
    }

    /// Load `generator.{ron,toml,json}` from `dir`, or the defaults if absent.
    pub fn discover(dir: &Path) -> Result<Self, DataLoadError> {
        match find_data_file(dir, CONFIG_BASE_NAME)? {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// The id allocator for rules synthesized under this configuration.
    pub fn allocator(&self) -> Result<IdAllocator, IdentifierError> {
        IdAllocator::new(&self.namespace, &self.category)
    }

    /// Resolve both catalysts against the item registry.
    pub fn catalysts<R: TypeResolver + ?Sized>(&self, resolver: &R) -> Result<Catalysts, DataLoadError> {
        let origin = "generator config";
        Ok(Catalysts {
            primary: resolve_item(resolver, &self.catalyst, &self.default_namespace, origin)?,
            secondary: resolve_item(resolver, &self.secondary_catalyst, &self.default_namespace, origin)?,
        })
    }

    /// Whether `amplification` lies in `1..=max_amount`.
    pub fn amplification_in_range(&self) -> bool {
        (1..=self.max_amount).contains(&self.amplification)
    }

    /// Whether a resource path is a descriptor document.
    pub fn accepts(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
    }
}
