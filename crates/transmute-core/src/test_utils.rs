//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests and, via the `test-utils` feature, in other
//! crates' tests.

use crate::id::*;
use crate::item::{Ingredient, ItemStack};
use crate::registry::{ItemRegistry, ItemRegistryBuilder};
use crate::rule::Rule;
use crate::synth::{Catalysts, DEFAULT_AMPLIFICATION, Synthesizer};

pub const NAMESPACE: &str = "itemalchemy";
pub const CATEGORY: &str = "alchemical_craft";

/// Every item name the fixture registry knows, in registration order.
pub const ITEM_NAMES: &[&str] = &[
    "itemalchemy:philosopher_stone",
    "minecraft:coal",
    "minecraft:iron_ore",
    "minecraft:iron_ingot",
    "minecraft:gold_ore",
    "minecraft:gold_ingot",
    "minecraft:gold_nugget",
    "minecraft:sand",
    "minecraft:glass",
    "minecraft:cobblestone",
    "minecraft:stone",
];

/// Parse an identifier, panicking on malformed input.
pub fn ident(raw: &str) -> Identifier {
    raw.parse()
        .unwrap_or_else(|e| panic!("bad test identifier '{raw}': {e}"))
}

/// A registry populated with [`ITEM_NAMES`] plus handles to the common items.
pub struct Fixture {
    pub registry: ItemRegistry,
    pub philosopher_stone: ItemTypeId,
    pub coal: ItemTypeId,
    pub iron_ore: ItemTypeId,
    pub iron_ingot: ItemTypeId,
    pub gold_ore: ItemTypeId,
    pub gold_ingot: ItemTypeId,
    pub gold_nugget: ItemTypeId,
    pub sand: ItemTypeId,
    pub glass: ItemTypeId,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        let mut builder = ItemRegistryBuilder::new();
        for name in ITEM_NAMES {
            builder.register(name).unwrap();
        }
        let registry = builder.build();
        let item = |name: &str| registry.item_id(&ident(name)).unwrap();

        Self {
            philosopher_stone: item("itemalchemy:philosopher_stone"),
            coal: item("minecraft:coal"),
            iron_ore: item("minecraft:iron_ore"),
            iron_ingot: item("minecraft:iron_ingot"),
            gold_ore: item("minecraft:gold_ore"),
            gold_ingot: item("minecraft:gold_ingot"),
            gold_nugget: item("minecraft:gold_nugget"),
            sand: item("minecraft:sand"),
            glass: item("minecraft:glass"),
            registry,
        }
    }

    pub fn catalysts(&self) -> Catalysts {
        Catalysts {
            primary: self.philosopher_stone,
            secondary: self.coal,
        }
    }

    pub fn allocator(&self) -> IdAllocator {
        IdAllocator::new(NAMESPACE, CATEGORY).unwrap()
    }

    pub fn synthesizer<'a>(&self, ids: &'a mut IdAllocator) -> Synthesizer<'a> {
        Synthesizer::new(self.catalysts(), DEFAULT_AMPLIFICATION, ids)
    }

    /// A one-slot smelting rule producing a single `output`.
    pub fn smelting(&self, id: &str, input: ItemTypeId, output: ItemTypeId) -> Rule {
        Rule::smelting(ident(id), Ingredient::single(input), ItemStack::one(output))
    }
}
