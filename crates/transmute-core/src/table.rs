//! Category-partitioned rule table.
//!
//! The host owns a [`RuleTableBuilder`] for the duration of a reload. Rules are
//! appended per category through [`CategoryBuilder::put`], any category can be
//! snapshotted mid-reload with [`CategoryBuilder::build`], and the whole table
//! is frozen into an immutable [`RuleTable`] at the end.

use crate::id::Identifier;
use crate::rule::{Rule, RuleKind};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleTableError {
    #[error("duplicate rule id '{id}' in category {category}")]
    DuplicateId { category: RuleKind, id: Identifier },
}

/// Accumulates the rules of one category, preserving insertion order.
#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    kind: RuleKind,
    rules: Vec<Rule>,
    index: HashMap<Identifier, usize>,
}

impl CategoryBuilder {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Add a rule keyed by its id. Ids must be unique within the category.
    pub fn put(&mut self, rule: Rule) -> Result<(), RuleTableError> {
        if self.index.contains_key(&rule.id) {
            return Err(RuleTableError::DuplicateId {
                category: self.kind,
                id: rule.id,
            });
        }
        self.index.insert(rule.id.clone(), self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Immutable snapshot of everything put so far.
    pub fn build(&self) -> CategoryMap {
        CategoryMap {
            kind: self.kind,
            rules: self.rules.clone(),
            index: self.index.clone(),
        }
    }
}

/// Immutable id → rule mapping for a single category, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMap {
    kind: RuleKind,
    rules: Vec<Rule>,
    #[serde(skip)]
    index: HashMap<Identifier, usize>,
}

impl CategoryMap {
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn get(&self, id: &Identifier) -> Option<&Rule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PartialEq for CategoryMap {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.rules == other.rules
    }
}

impl Eq for CategoryMap {}

/// Mutable rule table used during a reload.
#[derive(Debug, Clone, Default)]
pub struct RuleTableBuilder {
    categories: BTreeMap<RuleKind, CategoryBuilder>,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The builder for `kind`, created empty on first access.
    pub fn get(&mut self, kind: RuleKind) -> &mut CategoryBuilder {
        self.categories
            .entry(kind)
            .or_insert_with(|| CategoryBuilder::new(kind))
    }

    /// Put `rule` into the category matching its own kind.
    pub fn put(&mut self, rule: Rule) -> Result<(), RuleTableError> {
        self.get(rule.kind).put(rule)
    }

    /// Snapshot of one category; empty if nothing was ever put there.
    pub fn snapshot(&self, kind: RuleKind) -> CategoryMap {
        match self.categories.get(&kind) {
            Some(category) => category.build(),
            None => CategoryBuilder::new(kind).build(),
        }
    }

    /// Finalize into an immutable table.
    pub fn build(self) -> RuleTable {
        RuleTable {
            categories: self
                .categories
                .into_iter()
                .map(|(kind, category)| (kind, category.build()))
                .collect(),
        }
    }
}

/// Immutable rule table. Frozen after build().
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    categories: BTreeMap<RuleKind, CategoryMap>,
}

impl RuleTable {
    pub fn category(&self, kind: RuleKind) -> Option<&CategoryMap> {
        self.categories.get(&kind)
    }

    pub fn get(&self, kind: RuleKind, id: &Identifier) -> Option<&Rule> {
        self.categories.get(&kind)?.get(id)
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryMap> {
        self.categories.values()
    }

    pub fn rule_count(&self) -> usize {
        self.categories.values().map(CategoryMap::len).sum()
    }
}
