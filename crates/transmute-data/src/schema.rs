//! Serde data file structs.
//!
//! These define the on-disk format for alchemical descriptors and rule files.
//! They are deserialized and then resolved into core types by the parser and
//! the rule loader.

use serde::Deserialize;
use transmute_core::rule::RuleKind;

// ===========================================================================
// Alchemical descriptors
// ===========================================================================

/// One entry of a descriptor document.
///
/// ```json
/// { "items": ["minecraft:iron_ingot", "minecraft:gold_nugget"], "amount": 2 }
/// ```
///
/// `items` is exactly `[input, output]`. `amount` is read as a plain integer
/// and range-checked by the parser.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorData {
    pub items: (String, String),
    pub amount: i64,
}

// ===========================================================================
// Rule files
// ===========================================================================

/// One ingredient slot: a single item, or any of several items.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientData {
    Item(String),
    AnyOf(Vec<String>),
}

/// A rule definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleData {
    pub id: String,
    pub kind: RuleKind,
    #[serde(default)]
    pub group: String,
    /// `(item, count)`.
    pub result: (String, u32),
    pub ingredients: Vec<IngredientData>,
}

/// Wrapper for a list of rules in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRules {
    pub rules: Vec<RuleData>,
}

// ===========================================================================
// Tests
// ===========================================================================
