//! Transmute Core -- rule model and synthesis for data-driven alchemical recipes.
//!
//! # Key Types
//!
//! - [`id::Identifier`] -- Namespaced `namespace:path` resource identifier.
//! - [`id::IdAllocator`] -- Per-pass sequence of `namespace:category/id_<n>` ids.
//! - [`registry::ItemRegistry`] -- Immutable item registry; implements
//!   [`registry::TypeResolver`].
//! - [`rule::Rule`] -- A result stack plus an ordered list of ingredient slots.
//! - [`table::RuleTableBuilder`] -- Category-partitioned sink that rules are
//!   written into during a reload, frozen into a [`table::RuleTable`].
//! - [`synth::Synthesizer`] -- Writes explicit and smelting-derived alchemical
//!   rules into the table.

pub mod id;
pub mod item;
pub mod registry;
pub mod rule;
pub mod synth;
pub mod table;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
