//! Prompt assembly for the itinerary generator

use crate::models::TripRequest;

/// Render the generation prompt from the trip parameters and prior history.
///
/// The reply format is pinned here: day-numbered headings and a per-day cost
/// breakdown with four fixed labels plus a total, all in LKR.
#[must_use]
pub fn build_prompt(request: &TripRequest, history: &str) -> String {
    format!(
        "You are a travel planner for Sri Lanka. Create a {duration}-day itinerary \
         from {start} to {end} for {style} travel.\n\
         - Format: **Day X: City** with activities, accommodation, transport, and costs \
         in LKR (within {budget} LKR).\n\
         - Tailor to interests: {interests}.\n\
         - Use history: {history}.\n\
         - User input: {notes}.\n\
         - End with budget summary.\n\
         Daily costs format:\n\
         **Accommodation:** [Price] LKR\n\
         **Food:** [Price] LKR\n\
         **Transport:** [Price] LKR\n\
         **Activities:** [Price] LKR\n\
         **Total:** [Price] LKR",
        duration = request.duration_days,
        start = request.start_city,
        end = request.end_city,
        style = request.style,
        budget = request.budget_lkr,
        interests = request.interests,
        history = history,
        notes = request.notes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TravelStyle;

    fn request() -> TripRequest {
        TripRequest {
            start_city: "Colombo".to_string(),
            end_city: "Galle".to_string(),
            duration_days: 5,
            budget_lkr: 150_000,
            interests: "Culture, Beach".to_string(),
            style: TravelStyle::Luxury,
            notes: "vegetarian food".to_string(),
        }
    }

    #[test]
    fn test_prompt_carries_all_parameters() {
        let prompt = build_prompt(&request(), "Human: hi\nAI: hello");
        assert!(prompt.contains("5-day itinerary from Colombo to Galle"));
        assert!(prompt.contains("for Luxury travel"));
        assert!(prompt.contains("within 150000 LKR"));
        assert!(prompt.contains("interests: Culture, Beach"));
        assert!(prompt.contains("Use history: Human: hi\nAI: hello."));
        assert!(prompt.contains("User input: vegetarian food."));
    }

    #[test]
    fn test_prompt_pins_cost_labels() {
        let prompt = build_prompt(&request(), "");
        for label in ["Accommodation", "Food", "Transport", "Activities", "Total"] {
            assert!(prompt.contains(&format!("**{label}:** [Price] LKR")));
        }
    }
}
