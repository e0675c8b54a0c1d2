use crate::id::*;
use std::collections::HashMap;

/// Maps symbolic item identifiers to concrete item type handles.
pub trait TypeResolver {
    fn resolve(&self, id: &Identifier) -> Option<ItemTypeId>;
}

/// Builder for constructing an immutable [`ItemRegistry`].
#[derive(Debug, Default)]
pub struct ItemRegistryBuilder {
    items: Vec<Identifier>,
    item_name_to_id: HashMap<Identifier, ItemTypeId>,
}

impl ItemRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item type. Returns its ID.
    pub fn register_item(&mut self, name: Identifier) -> Result<ItemTypeId, RegistryError> {
        if self.item_name_to_id.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        let id = ItemTypeId(self.items.len() as u32);
        self.item_name_to_id.insert(name.clone(), id);
        self.items.push(name);
        Ok(id)
    }

    /// Parse `name` and register it.
    pub fn register(&mut self, name: &str) -> Result<ItemTypeId, RegistryError> {
        self.register_item(name.parse()?)
    }

    /// Lookup item type ID by name.
    pub fn item_id(&self, name: &Identifier) -> Option<ItemTypeId> {
        self.item_name_to_id.get(name).copied()
    }

    /// Finalize and build the immutable registry.
    pub fn build(self) -> ItemRegistry {
        ItemRegistry {
            items: self.items,
            item_name_to_id: self.item_name_to_id,
        }
    }
}

/// Immutable item registry. Frozen after build().
#[derive(Debug)]
pub struct ItemRegistry {
    items: Vec<Identifier>,
    item_name_to_id: HashMap<Identifier, ItemTypeId>,
}

impl ItemRegistry {
    pub fn item_name(&self, id: ItemTypeId) -> Option<&Identifier> {
        self.items.get(id.0 as usize)
    }

    pub fn item_id(&self, name: &Identifier) -> Option<ItemTypeId> {
        self.item_name_to_id.get(name).copied()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl TypeResolver for ItemRegistry {
    fn resolve(&self, id: &Identifier) -> Option<ItemTypeId> {
        self.item_id(id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("item already registered: {0}")]
    Duplicate(Identifier),
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),
}
