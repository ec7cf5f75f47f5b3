use serde::{Deserialize, Serialize};

/// Kulturell hälsotradition (statisk referensdata, skrivs endast vid första start)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalPractice {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub region: String,
    pub category: String,
    pub health_benefits: String,
    pub health_considerations: String,
}

impl CulturalPractice {
    fn seed(
        name: &str,
        description: &str,
        region: &str,
        category: &str,
        health_benefits: &str,
        health_considerations: &str,
    ) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            region: region.to_string(),
            category: category.to_string(),
            health_benefits: health_benefits.to_string(),
            health_considerations: health_considerations.to_string(),
        }
    }

    /// Fördefinierade traditioner
    pub fn default_practices() -> Vec<Self> {
        vec![
            Self::seed(
                "Ayurveda",
                "Traditional Indian system of medicine focusing on balance between body, mind, and spirit.",
                "South Asia",
                "Traditional Medicine",
                "Holistic wellness, stress reduction, natural healing",
                "Consult healthcare provider before starting new treatments",
            ),
            Self::seed(
                "Traditional Chinese Medicine",
                "Ancient healing system using acupuncture, herbs, and other practices.",
                "East Asia",
                "Traditional Medicine",
                "Pain management, stress relief, improved energy flow",
                "Ensure practitioner is licensed and qualified",
            ),
            Self::seed(
                "Mediterranean Diet",
                "Traditional eating pattern from Mediterranean region emphasizing whole foods.",
                "Mediterranean",
                "Nutrition",
                "Heart health, longevity, reduced inflammation",
                "Adapt to local food availability and personal needs",
            ),
            Self::seed(
                "Hammam",
                "Traditional Middle Eastern steam bath and cleansing ritual.",
                "Middle East",
                "Wellness",
                "Skin health, relaxation, social connection",
                "Stay hydrated, avoid if pregnant or with certain conditions",
            ),
            Self::seed(
                "Forest Bathing",
                "Japanese practice of immersing oneself in nature for health benefits.",
                "Japan",
                "Wellness",
                "Stress reduction, improved mood, better sleep",
                "Be mindful of allergies and weather conditions",
            ),
            Self::seed(
                "Traditional Herbal Medicine",
                "Use of plants and herbs for medicinal purposes across various cultures.",
                "Global",
                "Traditional Medicine",
                "Natural healing, immune support, symptom relief",
                "Research interactions with medications",
            ),
            Self::seed(
                "Mindfulness Meditation",
                "Buddhist practice of present-moment awareness adapted for modern use.",
                "Global",
                "Mental Health",
                "Stress reduction, improved focus, emotional regulation",
                "Start with short sessions, seek guidance if needed",
            ),
            Self::seed(
                "Traditional Dance",
                "Cultural dance forms that combine physical activity with cultural expression.",
                "Global",
                "Physical Activity",
                "Cardiovascular health, coordination, cultural connection",
                "Start slowly, respect cultural significance",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_practices_have_unique_names() {
        let practices = CulturalPractice::default_practices();
        assert_eq!(practices.len(), 8);

        let names: HashSet<_> = practices.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), practices.len());
        assert!(practices.iter().all(|p| p.id.is_none() && !p.category.is_empty()));
    }
}
