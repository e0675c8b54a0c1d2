//! Integration test: a full reload pass from files on disk.
//!
//! Lays out an asset tree the way a host would ship it: a generator config,
//! a smelting rule file, and descriptor documents spread over two namespaces.
//! One document is malformed. The pass must skip it, synthesize everything
//! else, and produce the same table every time it runs against a fresh
//! builder.

use std::fs;
use std::path::{Path, PathBuf};

use transmute_core::item::{Ingredient, ItemStack};
use transmute_core::rule::RuleKind;
use transmute_core::table::{RuleTable, RuleTableBuilder};
use transmute_core::test_utils::{Fixture, ident};
use transmute_data::diagnostics::RecordingDiagnostics;
use transmute_data::rules::load_rules;
use transmute_data::source::DirectorySource;
use transmute_data::{DataLoadError, GeneratorConfig, RuleGenerator};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "transmute_integration_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

const SMELTING: &str = r#"[
    (
        id: "minecraft:iron_ingot",
        kind: smelting,
        result: ("iron_ingot", 1),
        ingredients: ["iron_ore"],
    ),
    (
        id: "minecraft:gold_ingot",
        kind: smelting,
        result: ("gold_ingot", 1),
        ingredients: ["gold_ore"],
    ),
    (
        id: "minecraft:glass",
        kind: smelting,
        result: ("glass", 1),
        ingredients: [["sand", "cobblestone"]],
    ),
    (
        id: "minecraft:stone",
        kind: smelting,
        result: ("stone", 1),
        ingredients: [[]],
    ),
]"#;

/// Build the asset tree and return (root, assets dir).
fn lay_out(suffix: &str) -> (PathBuf, PathBuf) {
    let root = make_test_dir(suffix);
    let assets = root.join("assets");

    write(&root.join("generator.toml"), "amplification = 4\n");
    write(&root.join("smelting.ron"), SMELTING);

    write(
        &assets.join("itemalchemy/alchemical_craft/metals.json"),
        r#"[
            { "items": ["iron_ingot", "gold_nugget"], "amount": 8 },
            { "items": ["gold_nugget", "gold_ingot"], "amount": 9 }
        ]"#,
    );
    write(
        &assets.join("itemalchemy/alchemical_craft/broken.json"),
        r#"[ { "items": ["sand"], "amount": 1 } "#,
    );
    write(
        &assets.join("addon/alchemical_craft/nested/sand.json"),
        r#"[ { "items": ["minecraft:cobblestone", "minecraft:sand"], "amount": 0 } ]"#,
    );
    write(
        &assets.join("addon/alchemical_craft/readme.txt"),
        "descriptor documents live next to this file",
    );

    (root, assets)
}

fn run_pass(root: &Path, assets: &Path, fx: &Fixture) -> (RuleTable, RuleGenerator<RecordingDiagnostics>) {
    let config = GeneratorConfig::discover(root).unwrap();
    let mut table = RuleTableBuilder::new();
    load_rules(
        &root.join("smelting.ron"),
        &fx.registry,
        &config.default_namespace,
        &mut table,
    )
    .unwrap();

    let mut generator = RuleGenerator::with_diagnostics(config, RecordingDiagnostics::new()).unwrap();
    let report = generator
        .apply(&DirectorySource::new(assets), &fx.registry, &mut table)
        .unwrap();

    assert_eq!(report.documents, 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.was_skipped(&ident("itemalchemy:alchemical_craft/broken.json")));
    assert!(matches!(report.skipped[0].error, DataLoadError::Parse { .. }));
    assert_eq!(report.explicit_rules, 3);
    // The stone rule has an empty slot and is not amplified.
    assert_eq!(report.derived_rules, 3);

    (table.build(), generator)
}

#[test]
fn full_pass_from_disk() {
    let fx = Fixture::new();
    let (root, assets) = lay_out("full_pass");
    let (table, generator) = run_pass(&root, &assets, &fx);

    assert!(generator
        .diagnostics()
        .mentions(&ident("itemalchemy:alchemical_craft/broken.json")));
    assert_eq!(generator.issued(), 6);

    let crafting = table.category(RuleKind::Crafting).unwrap();
    assert_eq!(crafting.len(), 6);
    let rule = |n: u32| {
        crafting
            .get(&ident(&format!("itemalchemy:alchemical_craft/id_{n}")))
            .unwrap()
    };

    // Explicit rules: the addon namespace sorts first.
    assert_eq!(rule(0).result, ItemStack::one(fx.sand));
    assert_eq!(rule(0).ingredients, vec![Ingredient::single(fx.philosopher_stone)]);

    assert_eq!(rule(1).result, ItemStack::one(fx.gold_nugget));
    assert_eq!(rule(1).ingredients.len(), 9);
    assert!(rule(1).ingredients[1..].iter().all(|i| i.matches(fx.iron_ingot)));

    assert_eq!(rule(2).result, ItemStack::one(fx.gold_ingot));
    assert_eq!(rule(2).ingredients.len(), 10);

    // Derived rules follow, in smelting order, amplified by the configured 4.
    assert_eq!(rule(3).result, ItemStack::new(fx.iron_ingot, 4));
    assert_eq!(rule(3).ingredients.len(), 6);
    assert_eq!(rule(3).ingredients[0], Ingredient::single(fx.philosopher_stone));
    assert_eq!(rule(3).ingredients[1], Ingredient::single(fx.coal));
    assert!(rule(3).ingredients[2..].iter().all(|i| i.matches(fx.iron_ore)));

    assert_eq!(rule(4).result, ItemStack::new(fx.gold_ingot, 4));

    // The glass slot keeps both alternatives in every repetition.
    assert_eq!(rule(5).result, ItemStack::new(fx.glass, 4));
    assert!(rule(5).ingredients[2..]
        .iter()
        .all(|i| i.matches(fx.sand) && i.items().len() == 2));

    // Smelting rules are untouched.
    assert_eq!(table.category(RuleKind::Smelting).unwrap().len(), 4);
    assert_eq!(table.rule_count(), 10);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn pass_is_deterministic() {
    let fx = Fixture::new();
    let (root, assets) = lay_out("deterministic");

    let (first, _) = run_pass(&root, &assets, &fx);
    let (second, _) = run_pass(&root, &assets, &fx);
    assert_eq!(first, second);

    let dump_a = serde_json::to_string(&first).unwrap();
    let dump_b = serde_json::to_string(&second).unwrap();
    assert_eq!(dump_a, dump_b);

    let value = serde_json::to_value(&first).unwrap();
    let crafting = &value["categories"]["crafting"]["rules"];
    assert_eq!(crafting[0]["id"], "itemalchemy:alchemical_craft/id_0");
    assert_eq!(crafting[3]["result"]["count"], 4);

    let _ = fs::remove_dir_all(&root);
}
