//! Exportable trip document
//!
//! Bundles the itinerary text, meal plan, and phrasebook into the key-value
//! document users download and keep alongside their booking notes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::meals::MealPlan;
use crate::phrasebook::Phrasebook;

/// The document offered for download after a successful generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDocument {
    #[serde(rename = "Itinerary")]
    pub itinerary: String,
    #[serde(rename = "Meals")]
    pub meals: MealPlan,
    #[serde(rename = "Phrasebook")]
    pub phrasebook: Phrasebook,
}

impl TripDocument {
    #[must_use]
    pub fn new(itinerary: impl Into<String>, meals: MealPlan, phrasebook: Phrasebook) -> Self {
        Self {
            itinerary: itinerary.into(),
            meals,
            phrasebook,
        }
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).with_context(|| "Failed to serialize trip document")
    }

    /// Write the document to disk
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write trip document to {}", path.display()))
    }
}
