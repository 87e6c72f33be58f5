//! Cross-module normalization properties: envelopes, tri-state booleans,
//! status mapping, calories and search over normalized records.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::{Value, json};

use tanawal_core::entities::Calories;
use tanawal_core::normalize::coerce::{safe_number, tri_state};
use tanawal_core::normalize::{FromRaw, normalize_collection};
use tanawal_core::query::search;
use tanawal_core::{DeliveryStatus, Food, FoodId, OrderStatus, TriState};

// =============================================================================
// Envelopes
// =============================================================================

#[test]
fn test_every_envelope_shape_yields_one_food() {
    let shapes = [
        json!({ "Value": { "Foods": [{ "FoodID": 1 }] } }),
        json!({ "Foods": [{ "FoodID": 1 }] }),
        json!([{ "FoodID": 1 }]),
    ];
    for payload in shapes {
        let foods: Vec<Food> = normalize_collection(&payload);
        assert_eq!(foods.len(), 1, "payload {payload}");
        assert_eq!(foods.first().unwrap().id, FoodId::new(1));
    }
}

#[test]
fn test_unrecognized_envelopes_are_empty() {
    for payload in [json!({}), Value::Null, json!("oops"), json!({ "Foods": 3 })] {
        assert!(normalize_collection::<Food>(&payload).is_empty(), "payload {payload}");
    }
}

#[test]
fn test_camel_case_payload_normalizes_like_pascal_case() {
    let pascal = json!([{ "FoodID": 9, "FoodName": "Nihari", "Price": "850", "IsAvailable": 1 }]);
    let camel = json!([{ "foodId": 9, "foodName": "Nihari", "price": 850, "isAvailable": "yes" }]);
    let a: Vec<Food> = normalize_collection(&pascal);
    let b: Vec<Food> = normalize_collection(&camel);
    let (a, b) = (a.first().unwrap(), b.first().unwrap());
    assert_eq!(a.name, b.name);
    assert_eq!(a.price, Some(850.0));
    assert_eq!(a.price, b.price);
    assert_eq!(a.availability, b.availability);
}

// =============================================================================
// Calories and search
// =============================================================================

#[test]
fn test_disputed_calories_keep_both_values() {
    let foods: Vec<Food> = normalize_collection(&json!([{
        "FoodID": 3,
        "ProteinGrams": 10,
        "CarbsGrams": 20,
        "FatGrams": 5,
        "EstimatedCalories": 250,
    }]));
    let food = foods.first().unwrap();
    assert_eq!(food.nutrition.calculated_calories, Some(165));
    assert_eq!(
        food.nutrition.calories(),
        Calories::Disputed {
            estimated: 250.0,
            calculated: 165
        }
    );
}

#[test]
fn test_search_spicy_finds_only_noodles() {
    let foods: Vec<Food> = normalize_collection(&json!({ "Foods": [
        { "FoodID": 1, "FoodName": "Spicy Noodles" },
        { "FoodID": 2, "FoodName": "Mild Rice" },
    ]}));
    for query in ["spicy", "SPICY", "  Spicy "] {
        let hits = search(&foods, query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().id, FoodId::new(1));
    }
}

#[test]
fn test_safe_number_rejects_non_finite() {
    assert_eq!(safe_number(Some(&json!("abc"))), None);
    assert_eq!(safe_number(Some(&json!("42"))), Some(42.0));
    assert_eq!(safe_number(Some(&json!("Infinity"))), None);
    assert_eq!(safe_number(Some(&json!("NaN"))), None);
}

// =============================================================================
// Properties
// =============================================================================

const TRUE_WORDS: &[&str] = &["available", "true", "1", "yes", "y", "active"];
const FALSE_WORDS: &[&str] = &[
    "unavailable",
    "false",
    "0",
    "no",
    "n",
    "inactive",
    "blocked",
    "not available",
    "not active",
];

const ORDER_SYNONYMS: &[(&str, OrderStatus)] = &[
    ("pending", OrderStatus::Pending),
    ("in_progress", OrderStatus::InProgress),
    ("processing", OrderStatus::InProgress),
    ("preparing", OrderStatus::InProgress),
    ("delivered", OrderStatus::Delivered),
    ("paid", OrderStatus::Delivered),
    ("completed", OrderStatus::Delivered),
    ("success", OrderStatus::Delivered),
    ("cancelled", OrderStatus::Cancelled),
    ("canceled", OrderStatus::Cancelled),
    ("fail", OrderStatus::Cancelled),
    ("failed", OrderStatus::Cancelled),
];

const DELIVERY_SYNONYMS: &[(&str, DeliveryStatus)] = &[
    ("pending", DeliveryStatus::Pending),
    ("assigned", DeliveryStatus::Assigned),
    ("picked_up", DeliveryStatus::PickedUp),
    ("in_transit", DeliveryStatus::InTransit),
    ("delivered", DeliveryStatus::Delivered),
    ("cancelled", DeliveryStatus::Cancelled),
    ("canceled", DeliveryStatus::Cancelled),
    ("failed", DeliveryStatus::Failed),
];

/// Upper/lower-case each char by mask and pad with whitespace.
fn disguise(word: &str, mask: u64, pad: &str, spaced: bool) -> String {
    let body: String = word
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let c = if spaced && c == '_' { ' ' } else { c };
            if mask >> (i % 64) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();
    format!("{pad}{body}{pad}")
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(|f| serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)),
        ".{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::hash_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_tri_state_is_total(value in arb_json()) {
        let state = tri_state(Some(&value));
        prop_assert!(matches!(state, TriState::True | TriState::False | TriState::Unknown));
    }

    #[test]
    fn prop_tri_state_synonyms(index in 0usize..15, mask in any::<u64>(), pad in "[ \t]{0,3}") {
        let (word, expected) = TRUE_WORDS
            .iter()
            .map(|w| (*w, TriState::True))
            .chain(FALSE_WORDS.iter().map(|w| (*w, TriState::False)))
            .nth(index)
            .unwrap();
        let input = disguise(word, mask, &pad, false);
        prop_assert_eq!(tri_state(Some(&json!(input))), expected);
    }

    #[test]
    fn prop_unlisted_words_are_unknown(word in "[q-x]{2,8}") {
        prop_assert_eq!(tri_state(Some(&json!(word))), TriState::Unknown);
    }

    #[test]
    fn prop_order_synonyms_map(
        index in 0usize..12,
        mask in any::<u64>(),
        pad in "[ \t]{0,3}",
        spaced in any::<bool>(),
    ) {
        let (word, expected) = *ORDER_SYNONYMS.get(index).unwrap();
        let input = disguise(word, mask, &pad, spaced);
        prop_assert_eq!(OrderStatus::from_raw(Some(&json!(input))), expected);
    }

    #[test]
    fn prop_delivery_synonyms_map(
        index in 0usize..8,
        mask in any::<u64>(),
        pad in "[ \t]{0,3}",
        spaced in any::<bool>(),
    ) {
        let (word, expected) = *DELIVERY_SYNONYMS.get(index).unwrap();
        let input = disguise(word, mask, &pad, spaced);
        prop_assert_eq!(DeliveryStatus::from_raw(Some(&json!(input))), expected);
    }

    #[test]
    fn prop_delivery_codes_are_total(code in any::<i64>()) {
        let status = DeliveryStatus::from_raw(Some(&json!(code)));
        let from_text = DeliveryStatus::from_raw(Some(&json!(code.to_string())));
        prop_assert_eq!(status, from_text);
        prop_assert_eq!(status == DeliveryStatus::Unknown, !(0..=6).contains(&code));
    }

    #[test]
    fn prop_order_codes_are_total(code in any::<i64>()) {
        let status = OrderStatus::from_raw(Some(&json!(code)));
        prop_assert_eq!(status == OrderStatus::Unknown, !(0..=3).contains(&code));
    }

    #[test]
    fn prop_status_mappers_never_panic(value in arb_json()) {
        let _ = OrderStatus::from_raw(Some(&value));
        let _ = DeliveryStatus::from_raw(Some(&value));
    }

    #[test]
    fn prop_food_normalizer_is_total(value in arb_json()) {
        let _ = normalize_collection::<Food>(&value);
        let _ = normalize_collection::<Food>(&json!({ "Foods": [value] }));
    }
}
