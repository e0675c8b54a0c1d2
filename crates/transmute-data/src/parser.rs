//! Descriptor parser: one raw JSON document in, validated specs out.
//!
//! A document is all-or-nothing. Every entry is parsed, range-checked, and
//! resolved before anything is returned, so a bad entry never leaves part of
//! its document behind in the rule table.
//!
//! Amounts outside `0..=max_amount` are rejected; each unit becomes one
//! ingredient slot.

use transmute_core::id::{Identifier, ItemTypeId};
use transmute_core::registry::TypeResolver;

use crate::loader::{DataLoadError, resolve_item};
use crate::schema::DescriptorData;

/// A resolved descriptor entry: `amount` units of `input` (plus the catalyst)
/// make one `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorSpec {
    pub input: ItemTypeId,
    pub output: ItemTypeId,
    pub amount: u32,
}

/// Parse and resolve every entry of a descriptor document.
pub fn parse_descriptors<R: TypeResolver + ?Sized>(
    bytes: &[u8],
    resource: &Identifier,
    resolver: &R,
    default_namespace: &str,
    max_amount: u32,
) -> Result<Vec<DescriptorSpec>, DataLoadError> {
    let origin = resource.to_string();
    let entries: Vec<DescriptorData> =
        serde_json::from_slice(bytes).map_err(|e| DataLoadError::Parse {
            origin: origin.clone(),
            detail: e.to_string(),
        })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<DescriptorSpec, DataLoadError> {
            let amount = checked_amount(entry.amount, max_amount).ok_or_else(|| {
                DataLoadError::InvalidAmount {
                    origin: origin.clone(),
                    index,
                    amount: entry.amount,
                }
            })?;
            resolve_descriptor(entry, amount, &origin, resolver, default_namespace)
        })
        .collect()
}

fn checked_amount(amount: i64, max_amount: u32) -> Option<u32> {
    u32::try_from(amount).ok().filter(|&a| a <= max_amount)
}

fn resolve_descriptor<R: TypeResolver + ?Sized>(
    entry: &DescriptorData,
    amount: u32,
    origin: &str,
    resolver: &R,
    default_namespace: &str,
) -> Result<DescriptorSpec, DataLoadError> {
    let (input, output) = &entry.items;

    Ok(DescriptorSpec {
        input: resolve_item(resolver, input, default_namespace, origin)?,
        output: resolve_item(resolver, output, default_namespace, origin)?,
        amount,
    })
}
