//! Rule synthesis.
//!
//! Two paths write derived crafting rules into a [`RuleTableBuilder`]:
//!
//! - **Explicit**: one rule per descriptor, `[catalyst, input × amount] → 1 × output`.
//! - **Bulk**: every smelting rule is amplified into
//!   `[catalyst, secondary, ingredient × n] → n × output`.
//!
//! Both share the caller's [`IdAllocator`], so rule ids reflect the order in
//! which rules were synthesized.

use crate::id::{IdAllocator, Identifier, ItemTypeId};
use crate::item::{Ingredient, IngredientSpec, ItemStack};
use crate::rule::{Rule, RuleKind};
use crate::table::{RuleTableBuilder, RuleTableError};

/// Output multiplier and per-ingredient repetition used by the bulk path.
pub const DEFAULT_AMPLIFICATION: u32 = 7;

/// The fixed ingredients every alchemical rule carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalysts {
    /// Present in every synthesized rule, always in the first slot.
    pub primary: ItemTypeId,
    /// Second slot of bulk-derived rules.
    pub secondary: ItemTypeId,
}

/// Ingredient list for an explicit alchemical rule: the catalyst followed by
/// `amount` copies of `input`. `amount == 0` gives a catalyst-only list.
pub fn alchemical_inputs(catalyst: ItemTypeId, input: &IngredientSpec, amount: u32) -> Vec<IngredientSpec> {
    let mut inputs = Vec::with_capacity(amount as usize + 1);
    inputs.push(IngredientSpec::Type(catalyst));
    inputs.extend(std::iter::repeat_n(input.clone(), amount as usize));
    inputs
}

/// Ingredient list for a bulk-derived rule.
pub fn amplified_inputs(catalysts: Catalysts, ingredient: &Ingredient, amplification: u32) -> Vec<IngredientSpec> {
    let mut inputs = Vec::with_capacity(amplification as usize + 2);
    inputs.push(IngredientSpec::Type(catalysts.primary));
    inputs.push(IngredientSpec::Type(catalysts.secondary));
    inputs.extend(std::iter::repeat_n(
        IngredientSpec::Matcher(ingredient.clone()),
        amplification as usize,
    ));
    inputs
}

/// Whether a smelting rule can be amplified at all.
fn is_transformable(rule: &Rule) -> bool {
    !rule.result.is_empty() && !rule.ingredients.iter().any(Ingredient::is_empty)
}

/// Writes synthesized rules for one pass.
#[derive(Debug)]
pub struct Synthesizer<'a> {
    catalysts: Catalysts,
    amplification: u32,
    ids: &'a mut IdAllocator,
}

impl<'a> Synthesizer<'a> {
    pub fn new(catalysts: Catalysts, amplification: u32, ids: &'a mut IdAllocator) -> Self {
        Self {
            catalysts,
            amplification,
            ids,
        }
    }

    pub fn catalysts(&self) -> Catalysts {
        self.catalysts
    }

    /// Build a shapeless crafting rule under the next id and put it in the
    /// crafting category.
    pub fn add_shapeless(
        &mut self,
        table: &mut RuleTableBuilder,
        result: ItemStack,
        inputs: &[IngredientSpec],
    ) -> Result<Identifier, RuleTableError> {
        let id = self.ids.next_id();
        let ingredients = inputs.iter().map(IngredientSpec::to_ingredient).collect();
        table.put(Rule::shapeless(id.clone(), result, ingredients))?;
        Ok(id)
    }

    /// Explicit path: `amount` units of `input` plus one catalyst make one `output`.
    pub fn add_alchemical(
        &mut self,
        table: &mut RuleTableBuilder,
        output: ItemTypeId,
        input: IngredientSpec,
        amount: u32,
    ) -> Result<Identifier, RuleTableError> {
        let inputs = alchemical_inputs(self.catalysts.primary, &input, amount);
        self.add_shapeless(table, ItemStack::one(output), &inputs)
    }

    /// Bulk path: derive one amplified rule per distinct ingredient of every
    /// smelting rule currently in the table. Returns the number of rules added.
    ///
    /// A smelting rule with an empty result or any empty ingredient slot
    /// contributes nothing.
    pub fn add_all_smelting(&mut self, table: &mut RuleTableBuilder) -> Result<usize, RuleTableError> {
        let smelting = table.snapshot(RuleKind::Smelting);
        let mut added = 0;

        for rule in smelting.iter().filter(|r| r.kind == RuleKind::Smelting) {
            if !is_transformable(rule) {
                tracing::debug!(rule = %rule.id, "skipping smelting rule with empty result or ingredient");
                continue;
            }

            let result = rule.result.with_count(self.amplification);
            let mut seen: Vec<&Ingredient> = Vec::with_capacity(rule.ingredients.len());
            for ingredient in &rule.ingredients {
                if seen.contains(&ingredient) {
                    continue;
                }
                seen.push(ingredient);

                let inputs = amplified_inputs(self.catalysts, ingredient, self.amplification);
                let id = self.add_shapeless(table, result, &inputs)?;
                tracing::debug!(source = %rule.id, derived = %id, "amplified smelting rule");
                added += 1;
            }
        }

        Ok(added)
    }
}
