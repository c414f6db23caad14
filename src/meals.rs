//! Meal suggestions for each trip day

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A dish with its typical price range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealOption {
    pub name: String,
    pub price: String,
}

/// Breakfast, lunch, and dinner picks for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMeals {
    pub day: u32,
    pub breakfast: MealOption,
    pub lunch: MealOption,
    pub dinner: MealOption,
}

/// Meal suggestions covering the whole trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    pub daily_plan: Vec<DailyMeals>,
}

const BREAKFAST: &[(&str, &str)] = &[
    ("String Hoppers", "300-800 LKR"),
    ("Kiribath", "200-500 LKR"),
];
const LUNCH: &[(&str, &str)] = &[
    ("Rice and Curry", "400-1200 LKR"),
    ("Kottu Roti", "500-1000 LKR"),
];
const DINNER: &[(&str, &str)] = &[
    ("Crab Curry", "1000-3000 LKR"),
    ("Deviled Chicken", "700-1500 LKR"),
];

fn pick<R: Rng + ?Sized>(options: &[(&str, &str)], rng: &mut R) -> MealOption {
    let (name, price) = options[rng.random_range(0..options.len())];
    MealOption {
        name: name.to_string(),
        price: price.to_string(),
    }
}

/// One breakfast/lunch/dinner pick per day
#[must_use]
pub fn suggest_meals(duration_days: u32) -> MealPlan {
    suggest_meals_with(duration_days, &mut rand::rng())
}

/// Deterministic variant for callers that bring their own randomness
pub fn suggest_meals_with<R: Rng + ?Sized>(duration_days: u32, rng: &mut R) -> MealPlan {
    let daily_plan = (1..=duration_days)
        .map(|day| DailyMeals {
            day,
            breakfast: pick(BREAKFAST, rng),
            lunch: pick(LUNCH, rng),
            dinner: pick(DINNER, rng),
        })
        .collect();
    MealPlan { daily_plan }
}
