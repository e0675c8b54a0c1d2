use crate::id::ItemTypeId;
use serde::{Deserialize, Serialize};

/// A quantity of a single item type. A stack with a count of zero is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemTypeId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: ItemTypeId, count: u32) -> Self {
        Self { item, count }
    }

    /// A single unit of `item`.
    pub fn one(item: ItemTypeId) -> Self {
        Self::new(item, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Copy of this stack with a different count.
    pub fn with_count(&self, count: u32) -> Self {
        Self::new(self.item, count)
    }
}

/// Matches any one of a set of item types in a single ingredient slot.
///
/// Items are kept in insertion order without duplicates. An ingredient that
/// accepts nothing is empty and can never be satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    items: Vec<ItemTypeId>,
}

impl Ingredient {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(item: ItemTypeId) -> Self {
        Self { items: vec![item] }
    }

    pub fn of_items(items: impl IntoIterator<Item = ItemTypeId>) -> Self {
        let mut out = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Self { items: out }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` satisfies this slot.
    pub fn matches(&self, item: ItemTypeId) -> bool {
        self.items.contains(&item)
    }

    pub fn items(&self) -> &[ItemTypeId] {
        &self.items
    }
}

/// Input to rule construction: either a bare item type or an existing matcher
/// carried over unchanged from another rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientSpec {
    Type(ItemTypeId),
    Matcher(Ingredient),
}

impl IngredientSpec {
    pub fn to_ingredient(&self) -> Ingredient {
        match self {
            IngredientSpec::Type(item) => Ingredient::single(*item),
            IngredientSpec::Matcher(ingredient) => ingredient.clone(),
        }
    }
}

impl From<ItemTypeId> for IngredientSpec {
    fn from(item: ItemTypeId) -> Self {
        IngredientSpec::Type(item)
    }
}

impl From<Ingredient> for IngredientSpec {
    fn from(ingredient: Ingredient) -> Self {
        IngredientSpec::Matcher(ingredient)
    }
}
