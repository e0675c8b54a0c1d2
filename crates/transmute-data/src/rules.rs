//! Rule data files: the host-side way to seed categories such as smelting
//! before a generator pass runs.

use std::path::Path;
use transmute_core::id::Identifier;
use transmute_core::item::{Ingredient, ItemStack};
use transmute_core::registry::TypeResolver;
use transmute_core::rule::Rule;
use transmute_core::table::RuleTableBuilder;

use crate::loader::{DataLoadError, deserialize_list, resolve_item};
use crate::schema::{IngredientData, RuleData};

/// Resolve one rule definition against the item registry.
pub fn resolve_rule<R: TypeResolver + ?Sized>(
    data: &RuleData,
    resolver: &R,
    default_namespace: &str,
    origin: &str,
) -> Result<Rule, DataLoadError> {
    let id = Identifier::parse_or(&data.id, default_namespace).map_err(|source| {
        DataLoadError::InvalidIdentifier {
            origin: origin.to_string(),
            source,
        }
    })?;

    let (result_name, count) = &data.result;
    let result = ItemStack::new(
        resolve_item(resolver, result_name, default_namespace, origin)?,
        *count,
    );

    let ingredients = data
        .ingredients
        .iter()
        .map(|slot| -> Result<Ingredient, DataLoadError> {
            let names: &[String] = match slot {
                IngredientData::Item(name) => std::slice::from_ref(name),
                IngredientData::AnyOf(names) => names,
            };
            let items = names
                .iter()
                .map(|name| resolve_item(resolver, name, default_namespace, origin))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Ingredient::of_items(items))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rule = Rule::new(id, data.kind, result, ingredients);
    rule.group = data.group.clone();
    Ok(rule)
}

/// Load every rule in a RON, JSON, or TOML (`rules = [...]`) file into the
/// table, each under the category of its own kind. Returns the number loaded.
///
/// The file is resolved completely before anything is written.
pub fn load_rules<R: TypeResolver + ?Sized>(
    path: &Path,
    resolver: &R,
    default_namespace: &str,
    table: &mut RuleTableBuilder,
) -> Result<usize, DataLoadError> {
    let origin = path.display().to_string();
    let data: Vec<RuleData> = deserialize_list(path, "rules")?;
    let rules = data
        .iter()
        .map(|d| resolve_rule(d, resolver, default_namespace, &origin))
        .collect::<Result<Vec<_>, _>>()?;

    let count = rules.len();
    for rule in rules {
        table.put(rule)?;
    }
    tracing::debug!(file = %origin, count, "loaded rules");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, make_test_dir};
    use std::fs;
    use transmute_core::rule::RuleKind;
    use transmute_core::table::RuleTableError;
    use transmute_core::test_utils::{Fixture, ident};

    const SMELTING_RON: &str = r#"[
        (
            id: "minecraft:iron_ingot",
            kind: smelting,
            result: ("minecraft:iron_ingot", 1),
            ingredients: ["minecraft:iron_ore"],
        ),
        (
            id: "glass",
            kind: smelting,
            group: "glass",
            result: ("glass", 1),
            ingredients: [["sand", "minecraft:cobblestone"]],
        ),
    ]"#;

    #[test]
    fn load_ron_rules() {
        let fx = Fixture::new();
        let dir = make_test_dir("rules_ron");
        let path = dir.join("smelting.ron");
        fs::write(&path, SMELTING_RON).unwrap();

        let mut table = RuleTableBuilder::new();
        assert_eq!(load_rules(&path, &fx.registry, "minecraft", &mut table).unwrap(), 2);

        let smelting = table.snapshot(RuleKind::Smelting);
        let glass = smelting.get(&ident("minecraft:glass")).unwrap();
        assert_eq!(glass.group, "glass");
        assert_eq!(glass.result, ItemStack::one(fx.glass));
        assert!(glass.ingredients[0].matches(fx.sand));
        assert_eq!(glass.ingredients[0].items().len(), 2);

        cleanup(&dir);
    }

    #[test]
    fn load_toml_rules() {
        let fx = Fixture::new();
        let dir = make_test_dir("rules_toml");
        let path = dir.join("smelting.toml");
        fs::write(
            &path,
            r#"
[[rules]]
id = "minecraft:gold_ingot"
kind = "smelting"
result = ["minecraft:gold_ingot", 1]
ingredients = ["minecraft:gold_ore"]
"#,
        )
        .unwrap();

        let mut table = RuleTableBuilder::new();
        assert_eq!(load_rules(&path, &fx.registry, "minecraft", &mut table).unwrap(), 1);
        assert!(table.get(RuleKind::Smelting).contains(&ident("minecraft:gold_ingot")));

        cleanup(&dir);
    }

    #[test]
    fn unresolved_item_writes_nothing() {
        let fx = Fixture::new();
        let dir = make_test_dir("rules_unresolved");
        let path = dir.join("smelting.json");
        fs::write(
            &path,
            r#"[
                { "id": "a", "kind": "smelting", "result": ["glass", 1], "ingredients": ["sand"] },
                { "id": "b", "kind": "smelting", "result": ["glass", 1], "ingredients": ["x:unobtainium"] }
            ]"#,
        )
        .unwrap();

        let mut table = RuleTableBuilder::new();
        let result = load_rules(&path, &fx.registry, "minecraft", &mut table);
        assert!(matches!(result, Err(DataLoadError::UnresolvedRef { .. })));
        assert!(table.get(RuleKind::Smelting).is_empty());

        cleanup(&dir);
    }

    #[test]
    fn duplicate_rule_id_is_table_error() {
        let fx = Fixture::new();
        let dir = make_test_dir("rules_duplicate");
        let path = dir.join("smelting.json");
        fs::write(
            &path,
            r#"[
                { "id": "a", "kind": "smelting", "result": ["glass", 1], "ingredients": ["sand"] },
                { "id": "a", "kind": "smelting", "result": ["stone", 1], "ingredients": ["cobblestone"] }
            ]"#,
        )
        .unwrap();

        let mut table = RuleTableBuilder::new();
        let result = load_rules(&path, &fx.registry, "minecraft", &mut table);
        assert!(matches!(
            result,
            Err(DataLoadError::RuleTable(RuleTableError::DuplicateId { .. }))
        ));

        cleanup(&dir);
    }

    #[test]
    fn empty_any_of_gives_empty_ingredient() {
        let fx = Fixture::new();
        let data = RuleData {
            id: "x:odd".to_string(),
            kind: RuleKind::Smelting,
            group: String::new(),
            result: ("glass".to_string(), 1),
            ingredients: vec![IngredientData::AnyOf(vec![])],
        };
        let rule = resolve_rule(&data, &fx.registry, "minecraft", "inline").unwrap();
        assert!(rule.ingredients[0].is_empty());
    }
}
