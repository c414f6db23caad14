//! Interest-matched activity suggestions

use serde::{Deserialize, Serialize};

/// A bookable activity with its location and price guidance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub name: String,
    pub location: String,
    pub cost: String,
}

impl Activity {
    fn new(name: &str, location: &str, cost: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            cost: cost.to_string(),
        }
    }
}

/// Activities grouped under one interest category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityCategory {
    pub category: String,
    pub activities: Vec<Activity>,
}

fn culture() -> Vec<Activity> {
    vec![Activity::new("Temple of the Tooth", "Kandy", "2000 LKR")]
}

fn beach() -> Vec<Activity> {
    vec![Activity::new("Whale Watching", "Mirissa", "6000-12000 LKR")]
}

/// Categories whose name contains one of the comma-separated interest
/// tokens; falls back to the popular culture picks when nothing matches.
#[must_use]
pub fn suggest_activities(interests: &str) -> Vec<ActivityCategory> {
    let tokens: Vec<String> = interests
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    let catalog = [("culture", culture()), ("beach", beach())];
    let recommended: Vec<ActivityCategory> = catalog
        .into_iter()
        .filter(|(category, _)| tokens.iter().any(|token| category.contains(token.as_str())))
        .map(|(category, activities)| ActivityCategory {
            category: category.to_string(),
            activities,
        })
        .collect();

    if recommended.is_empty() {
        vec![ActivityCategory {
            category: "popular".to_string(),
            activities: culture(),
        }]
    } else {
        recommended
    }
}
