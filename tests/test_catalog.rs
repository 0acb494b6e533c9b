//! Ingredient catalog resolution and update tests.

mod common;

use recipe_pricing::error::PricingError;
use recipe_pricing::models::{Category, MatchTier, Unit};
use recipe_pricing::IngredientCatalog;

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn exact_match_is_case_insensitive() {
    let catalog = IngredientCatalog::default();
    let r = catalog.resolve_detailed("Pork Belly");

    assert_eq!(r.tier, MatchTier::Exact);
    assert_eq!(r.entry.unit_price, 280.0);
    assert_eq!(r.entry.unit, Unit::Kg);
    assert_eq!(r.entry.category, Category::Protein);
}

#[test]
fn name_containing_a_catalog_key_resolves_to_it() {
    let catalog = IngredientCatalog::default();
    let r = catalog.resolve_detailed("fresh tilapia fish");

    assert_eq!(r.tier, MatchTier::Fuzzy);
    assert_eq!(r.matched.as_deref(), Some("fish"));
    assert_eq!(r.entry.unit_price, 300.0);
    assert_eq!(r.entry.category, Category::Protein);
}

#[test]
fn longest_contained_key_wins() {
    let catalog = IngredientCatalog::default();
    let r = catalog.resolve_detailed("red bell pepper");

    assert_eq!(r.matched.as_deref(), Some("bell pepper"));
    assert_eq!(r.entry.unit_price, 120.0);
}

#[test]
fn partial_name_matches_first_key_containing_it() {
    let catalog = IngredientCatalog::default();
    let r = catalog.resolve_detailed("chick");

    assert_eq!(r.tier, MatchTier::Fuzzy);
    assert_eq!(r.matched.as_deref(), Some("chicken thighs"));
}

#[test]
fn category_keywords_price_unlisted_proteins() {
    let catalog = IngredientCatalog::default();

    let tuna = catalog.resolve_detailed("tuna steak");
    assert_eq!(tuna.tier, MatchTier::Category);
    assert_eq!(tuna.entry.unit_price, 300.0);

    let trotters = catalog.resolve_detailed("pig trotters");
    assert_eq!(trotters.tier, MatchTier::Category);
    assert_eq!(trotters.entry.unit_price, 200.0);
    assert_eq!(trotters.entry.category, Category::Protein);
}

#[test]
fn vegetable_keyword_gives_vegetable_price() {
    let r = IngredientCatalog::default().resolve_detailed("vegetable stock");
    assert_eq!(r.tier, MatchTier::Category);
    assert_eq!(r.entry.unit_price, 50.0);
    assert_eq!(r.entry.category, Category::Vegetable);
}

#[test]
fn unknown_name_gets_default_entry() {
    let entry = IngredientCatalog::default().resolve("unobtainium");
    assert_eq!(entry.unit_price, 100.0);
    assert_eq!(entry.unit, Unit::Kg);
    assert_eq!(entry.category, Category::Other);
}

#[test]
fn blank_name_gets_default_entry() {
    let r = IngredientCatalog::default().resolve_detailed("   ");
    assert_eq!(r.tier, MatchTier::Default);
    assert!(r.matched.is_none());
}

#[test]
fn empty_catalog_still_resolves() {
    let catalog = IngredientCatalog::empty();
    assert_eq!(catalog.resolve("beef shank").unit_price, 450.0);
    assert_eq!(catalog.resolve("rice").unit_price, 100.0);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn seed_catalog_keeps_priority_order() {
    let catalog = IngredientCatalog::default();
    let names: Vec<&str> = catalog.iter().map(|(name, _)| name).take(3).collect();
    assert_eq!(names, ["pork belly", "pork ears", "pork snout"]);
    assert_eq!(catalog.len(), 46);
}

#[test]
fn categories_in_first_appearance_order() {
    let categories = IngredientCatalog::default().categories();
    assert_eq!(
        categories,
        vec![
            Category::Protein,
            Category::Vegetable,
            Category::Staple,
            Category::Condiment,
            Category::Oil,
            Category::Dairy,
            Category::Spice,
            Category::Coconut,
        ]
    );
}

#[test]
fn by_category_filters_entries() {
    let coconut = IngredientCatalog::default().by_category(Category::Coconut);
    let names: Vec<&str> = coconut.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["coconut milk", "coconut cream", "desiccated coconut"]);
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[test]
fn update_keeps_existing_category() {
    let mut catalog = IngredientCatalog::default();
    let entry = catalog.update("Garlic", 250.0, Unit::Kg).unwrap();

    assert_eq!(entry.category, Category::Vegetable);
    assert_eq!(catalog.get("garlic").unwrap().unit_price, 250.0);
    assert_eq!(catalog.len(), 46);
}

#[test]
fn update_appends_new_name_as_other() {
    let mut catalog = IngredientCatalog::default();
    let entry = catalog.update("Lemongrass", 90.0, Unit::Pack).unwrap();

    assert_eq!(entry.category, Category::Other);
    assert_eq!(catalog.len(), 47);
    assert_eq!(catalog.resolve_detailed("lemongrass").tier, MatchTier::Exact);
}

#[test]
fn update_rejects_non_positive_price() {
    let mut catalog = IngredientCatalog::default();

    for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = catalog.update("rice", price, Unit::Kg).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
    assert_eq!(catalog.get("rice").unwrap().unit_price, 50.0);
}

#[test]
fn update_rejects_blank_name() {
    let mut catalog = IngredientCatalog::default();
    let err = catalog.update("  ", 10.0, Unit::Kg).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn sdk_update_is_published_copy_on_write() {
    let sdk = common::seeded_sdk(1);
    let before = sdk.context().catalog();

    sdk.catalog().update_price("Onion", 95.0, Unit::Kg).unwrap();

    assert_eq!(before.get("onion").unwrap().unit_price, 80.0);
    assert_eq!(sdk.catalog().get("onion").unwrap().unit_price, 95.0);
}

#[test]
fn sdk_rejected_update_leaves_catalog_untouched() {
    let sdk = common::seeded_sdk(1);
    assert!(sdk.catalog().update_price("Onion", 0.0, Unit::Kg).is_err());
    assert_eq!(sdk.catalog().get("onion").unwrap().unit_price, 80.0);
}

#[test]
fn require_reports_missing_name() {
    let sdk = common::seeded_sdk(1);
    assert!(sdk.catalog().require("Tomato").is_ok());
    let err = sdk.catalog().require("saffron").unwrap_err();
    assert!(matches!(err, PricingError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn json_import_keeps_order_and_normalizes_names() {
    let json = r#"[
        {"name": "Bangus", "unitPrice": 220.0, "unit": "kg", "category": "protein"},
        {"name": "Patis", "unitPrice": 30.0, "unit": "bottle", "category": "condiment"}
    ]"#;
    let catalog = IngredientCatalog::from_json_str(json).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("BANGUS").unwrap().unit_price, 220.0);
    let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["bangus", "patis"]);
}

#[test]
fn json_import_rejects_negative_price() {
    let json = r#"[{"name": "rice", "unitPrice": -1.0, "unit": "kg", "category": "staple"}]"#;
    let err = IngredientCatalog::from_json_str(json).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn json_export_reimports_identically() {
    let catalog = IngredientCatalog::default();
    let json = catalog.to_json_string().unwrap();
    let back = IngredientCatalog::from_json_str(&json).unwrap();

    assert_eq!(back.items(), catalog.items());
}
