use chrono::NaiveDate;
use fitlog_core::db::open_db_in_memory;
use fitlog_core::{
    CustomFoodForm, DietRepository, DietService, DietServiceError, FoodEntry, NutritionGoals,
    RepoError, SqliteDietRepository,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn entry(name: &str, calories: f64, amount: f64) -> FoodEntry {
    FoodEntry {
        name: name.to_string(),
        calories,
        carbs: 0.0,
        fat: 0.0,
        protein: 0.0,
        amount,
        unit: Some("g".to_string()),
    }
}

#[test]
fn load_day_keeps_default_slots_and_groups_entries() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDietRepository::try_new(&conn).unwrap();
    let day = ymd(2024, 6, 3);

    repo.add_entry(day, " Lunch ", &entry("Rice", 130.0, 200.0))
        .unwrap();
    repo.add_entry(day, "late-night", &entry("Milk", 61.0, 250.0))
        .unwrap();
    repo.add_entry(ymd(2024, 6, 4), "lunch", &entry("Apple", 52.0, 100.0))
        .unwrap();

    let buckets = repo.load_day(day).unwrap();
    let slots: Vec<&str> = buckets.keys().map(String::as_str).collect();
    assert_eq!(slots, vec!["breakfast", "dinner", "late-night", "lunch", "snacks"]);
    assert_eq!(buckets["lunch"].len(), 1);
    assert_eq!(buckets["lunch"][0].name, "Rice");
    assert!(buckets["breakfast"].is_empty());
}

#[test]
fn add_entry_rejects_blank_slot_and_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDietRepository::try_new(&conn).unwrap();
    let day = ymd(2024, 6, 3);

    assert!(matches!(
        repo.add_entry(day, "   ", &entry("Rice", 130.0, 100.0)),
        Err(RepoError::Validation(_))
    ));
    assert!(matches!(
        repo.add_entry(day, "lunch", &entry(" ", 130.0, 100.0)),
        Err(RepoError::Validation(_))
    ));
}

#[test]
fn non_finite_values_roundtrip_as_nan_and_count_as_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDietRepository::try_new(&conn).unwrap();
    let day = ymd(2024, 6, 3);

    repo.add_entry(day, "snacks", &entry("Mystery bar", f64::NAN, 100.0))
        .unwrap();
    let records = repo.list_day_entries(day).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].entry.calories.is_nan());

    let service = DietService::new(repo);
    let summary = service
        .day_summary(day, &NutritionGoals::default(), 0)
        .unwrap();
    assert_eq!(summary.totals.calories, 0);
}

#[test]
fn day_summary_combines_catalog_and_custom_foods() {
    let conn = open_db_in_memory().unwrap();
    let service = DietService::new(SqliteDietRepository::try_new(&conn).unwrap());
    let day = ymd(2024, 6, 3);

    service.log_catalog_food(day, "breakfast", 1, 200.0).unwrap();
    service
        .log_custom_food(
            day,
            "lunch",
            &CustomFoodForm {
                name: "Grilled chicken".to_string(),
                calories: "165".to_string(),
                carbs: "0".to_string(),
                fat: "3.6g".to_string(),
                protein: "31".to_string(),
                amount: String::new(),
            },
        )
        .unwrap();

    let summary = service
        .day_summary(day, &NutritionGoals::default(), 300)
        .unwrap();
    assert_eq!(summary.totals.calories, 425);
    assert_eq!(summary.totals.carbs, 56);
    assert_eq!(summary.totals.fat, 4);
    assert_eq!(summary.totals.protein, 36);
    assert_eq!(summary.budget.goal, 2600);
    assert_eq!(summary.budget.remaining, 2600 - 425 + 300);
    assert_eq!(summary.macros.protein.goal_g, 65);
    assert_eq!(summary.buckets["lunch"][0].amount, 100.0);
}

#[test]
fn unknown_catalog_food_is_rejected_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = DietService::new(SqliteDietRepository::try_new(&conn).unwrap());
    let day = ymd(2024, 6, 3);

    assert!(matches!(
        service.log_catalog_food(day, "lunch", 42, 100.0),
        Err(DietServiceError::UnknownFood(42))
    ));
    let summary = service
        .day_summary(day, &NutritionGoals::default(), 0)
        .unwrap();
    assert!(summary.buckets.values().all(Vec::is_empty));
}

#[test]
fn remove_entry_deletes_once() {
    let conn = open_db_in_memory().unwrap();
    let service = DietService::new(SqliteDietRepository::try_new(&conn).unwrap());
    let day = ymd(2024, 6, 3);

    let id = service.log_catalog_food(day, "dinner", 8, 150.0).unwrap();
    service.remove_entry(id).unwrap();
    assert!(matches!(
        service.remove_entry(id),
        Err(RepoError::NotFound(missing)) if missing == id
    ));
}

#[test]
fn weekly_calories_zero_fills_missing_days() {
    let conn = open_db_in_memory().unwrap();
    let service = DietService::new(SqliteDietRepository::try_new(&conn).unwrap());

    // Apple is 52 kcal per 100 g.
    service
        .log_catalog_food(ymd(2024, 6, 1), "snacks", 3, 100.0)
        .unwrap();
    service
        .log_catalog_food(ymd(2024, 6, 7), "snacks", 3, 200.0)
        .unwrap();
    service
        .log_catalog_food(ymd(2024, 5, 31), "snacks", 3, 1000.0)
        .unwrap();

    let week = service.weekly_calories(ymd(2024, 6, 7)).unwrap();
    assert_eq!(week.days.len(), 7);
    assert_eq!(week.days[0].date, ymd(2024, 6, 1));
    assert_eq!(week.days[0].calories, 52);
    assert_eq!(week.days[6].calories, 104);
    assert!(week.days[1..6].iter().all(|day| day.calories == 0));
    assert_eq!(week.average, 22);
}
