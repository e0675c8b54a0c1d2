//! Transmute Data -- on-disk formats and the reload pass.
//!
//! Descriptor documents are JSON arrays of `{ "items": [input, output], "amount": n }`
//! found through a [`source::DescriptorSource`]. [`generator::RuleGenerator`]
//! turns them, together with the smelting rules already in the host's table,
//! into alchemical crafting rules.

pub mod config;
pub mod diagnostics;
pub mod generator;
pub mod loader;
pub mod parser;
pub mod rules;
pub mod schema;
pub mod source;

pub use config::GeneratorConfig;
pub use generator::{GenerateError, PassReport, RuleGenerator};
pub use loader::DataLoadError;
