use crate::id::Identifier;
use crate::item::{Ingredient, ItemStack};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a rule, which is also the category of the rule table it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Crafting,
    Smelting,
    Blasting,
    Smoking,
    CampfireCooking,
    Stonecutting,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Crafting => "crafting",
            RuleKind::Smelting => "smelting",
            RuleKind::Blasting => "blasting",
            RuleKind::Smoking => "smoking",
            RuleKind::CampfireCooking => "campfire_cooking",
            RuleKind::Stonecutting => "stonecutting",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transformation rule: consume one item per ingredient slot, produce `result`.
///
/// Crafting rules are shapeless; slot order carries no placement meaning but is
/// preserved as built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: Identifier,
    pub kind: RuleKind,
    #[serde(default)]
    pub group: String,
    pub result: ItemStack,
    pub ingredients: Vec<Ingredient>,
}

impl Rule {
    pub fn new(id: Identifier, kind: RuleKind, result: ItemStack, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id,
            kind,
            group: String::new(),
            result,
            ingredients,
        }
    }

    pub fn shapeless(id: Identifier, result: ItemStack, ingredients: Vec<Ingredient>) -> Self {
        Self::new(id, RuleKind::Crafting, result, ingredients)
    }

    pub fn smelting(id: Identifier, ingredient: Ingredient, result: ItemStack) -> Self {
        Self::new(id, RuleKind::Smelting, result, vec![ingredient])
    }
}
