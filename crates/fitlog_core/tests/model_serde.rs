use fitlog_core::nutrition::sum_entries;
use fitlog_core::{sum_nutrition, CalendarEvent, EventType, FoodEntry, MealBuckets};

#[test]
fn food_entry_accepts_loose_numeric_fields() {
    let json = r#"{
        "name": "Trail mix",
        "calories": "480kcal",
        "carbs": 45,
        "fat": null,
        "protein": {"value": 14},
        "amount": "50"
    }"#;
    let entry: FoodEntry = serde_json::from_str(json).unwrap();

    assert_eq!(entry.calories, 480.0);
    assert_eq!(entry.carbs, 45.0);
    assert!(entry.fat.is_nan());
    assert!(entry.protein.is_nan());
    assert_eq!(entry.amount, 50.0);
    assert_eq!(entry.unit, None);

    let totals = sum_entries([&entry]).rounded();
    assert_eq!(totals.calories, 240);
    assert_eq!(totals.carbs, 23);
    assert_eq!(totals.fat, 0);
    assert_eq!(totals.protein, 0);
}

#[test]
fn food_entry_without_amount_contributes_nothing() {
    let entry: FoodEntry =
        serde_json::from_str(r#"{"name": "Water", "calories": 10}"#).unwrap();
    assert!(entry.amount.is_nan());
    assert_eq!(entry.scale(), 0.0);
}

#[test]
fn meal_buckets_deserialize_and_sum() {
    let json = r#"{
        "breakfast": [
            {"name": "White rice", "calories": 130, "carbs": 28, "fat": 0.3, "protein": 2.7, "amount": 200, "unit": "g"}
        ],
        "lunch": [
            {"name": "Chicken breast", "calories": 165, "carbs": 0, "fat": 3.6, "protein": 31, "amount": 100, "unit": "g"}
        ],
        "dinner": [],
        "snacks": []
    }"#;
    let buckets: MealBuckets = serde_json::from_str(json).unwrap();
    let totals = sum_nutrition(&buckets);

    assert_eq!(totals.calories, 425);
    assert_eq!(totals.carbs, 56);
    assert_eq!(totals.fat, 4);
    assert_eq!(totals.protein, 36);
}

#[test]
fn calendar_event_uses_type_key_and_tolerates_unknown_tags() {
    let json = r#"{
        "id": "6f1c2e0a-8a53-4c55-9a3b-0d7f1d1f5c11",
        "title": "Climbing",
        "date": "2024-06-03T19:00:00",
        "type": "bouldering"
    }"#;
    let event: CalendarEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.event_type, EventType::Other);
    assert_eq!(event.description, None);

    let encoded = serde_json::to_value(CalendarEvent::new("Swim", "2024-06-04", EventType::Swimming))
        .unwrap();
    assert_eq!(encoded["type"], "swimming");
    assert_eq!(encoded["date"], "2024-06-04");
}
