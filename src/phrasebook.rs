//! Sinhala and Tamil phrasebook for travellers

use serde::{Deserialize, Serialize};

/// One phrase in all three renderings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phrase {
    pub english: String,
    pub sinhala: String,
    pub tamil: String,
}

impl Phrase {
    fn new(english: &str, sinhala: &str, tamil: &str) -> Self {
        Self {
            english: english.to_string(),
            sinhala: sinhala.to_string(),
            tamil: tamil.to_string(),
        }
    }
}

/// Phrases grouped by situation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phrasebook {
    pub greetings: Vec<Phrase>,
    pub essentials: Vec<Phrase>,
}

/// The fixed traveller phrasebook bundled with every exported plan
#[must_use]
pub fn phrasebook() -> Phrasebook {
    Phrasebook {
        greetings: vec![
            Phrase::new("Hello", "Ayubowan", "Vanakkam"),
            Phrase::new("Thank you", "Istuti", "Nandri"),
        ],
        essentials: vec![Phrase::new("How much?", "Meeka keeyada?", "Idhu evvalavu?")],
    }
}
