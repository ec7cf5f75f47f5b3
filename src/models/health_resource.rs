//! Länkar till betrodda hälsoresurser, grupperade per kategori

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kategori för en hälsoresurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthCategory {
    Heart,
    Diabetes,
    Cancer,
    Asthma,
    Mental,
    Nutrition,
    Exercise,
    General,
}

impl HealthCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Heart => "Hjärthälsa",
            Self::Diabetes => "Diabetes",
            Self::Cancer => "Cancer",
            Self::Asthma => "Astma",
            Self::Mental => "Psykisk hälsa",
            Self::Nutrition => "Kost",
            Self::Exercise => "Motion",
            Self::General => "Allmän hälsa",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Heart => "❤",
            Self::Diabetes => "💧",
            Self::Cancer => "🎗",
            Self::Asthma => "🌬",
            Self::Mental => "🧠",
            Self::Nutrition => "🍃",
            Self::Exercise => "🚶",
            Self::General => "✚",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Heart,
            Self::Diabetes,
            Self::Cancer,
            Self::Asthma,
            Self::Mental,
            Self::Nutrition,
            Self::Exercise,
            Self::General,
        ]
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// En extern resurs. Öppnas i webbläsaren.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthResource {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub category: HealthCategory,
}

const fn resource(
    title: &'static str,
    description: &'static str,
    url: &'static str,
    category: HealthCategory,
) -> HealthResource {
    HealthResource {
        title,
        description,
        url,
        category,
    }
}

pub const HEALTH_RESOURCES: &[HealthResource] = &[
    resource(
        "American Heart Association",
        "Learn about heart disease prevention, treatment, and research.",
        "https://www.heart.org",
        HealthCategory::Heart,
    ),
    resource(
        "Heart Foundation",
        "Resources for heart health and cardiovascular disease prevention.",
        "https://www.heartfoundation.org.au",
        HealthCategory::Heart,
    ),
    resource(
        "American Diabetes Association",
        "Resources for diabetes management and prevention.",
        "https://www.diabetes.org",
        HealthCategory::Diabetes,
    ),
    resource(
        "Diabetes UK",
        "Comprehensive diabetes information and support.",
        "https://www.diabetes.org.uk",
        HealthCategory::Diabetes,
    ),
    resource(
        "American Cancer Society",
        "Information about cancer prevention, treatment, and support.",
        "https://www.cancer.org",
        HealthCategory::Cancer,
    ),
    resource(
        "Cancer Research UK",
        "Latest cancer research and treatment information.",
        "https://www.cancerresearchuk.org",
        HealthCategory::Cancer,
    ),
    resource(
        "Asthma and Allergy Foundation",
        "Resources for asthma management and treatment.",
        "https://www.aafa.org",
        HealthCategory::Asthma,
    ),
    resource(
        "Global Initiative for Asthma",
        "International asthma guidelines and resources.",
        "https://ginasthma.org",
        HealthCategory::Asthma,
    ),
    resource(
        "National Institute of Mental Health",
        "Research and information about mental health conditions.",
        "https://www.nimh.nih.gov",
        HealthCategory::Mental,
    ),
    resource(
        "Mental Health First Aid",
        "Training and resources for mental health support.",
        "https://www.mentalhealthfirstaid.org",
        HealthCategory::Mental,
    ),
    resource(
        "Academy of Nutrition and Dietetics",
        "Expert nutrition information and resources.",
        "https://www.eatright.org",
        HealthCategory::Nutrition,
    ),
    resource(
        "Nutrition.gov",
        "Government nutrition information and guidelines.",
        "https://www.nutrition.gov",
        HealthCategory::Nutrition,
    ),
    resource(
        "American College of Sports Medicine",
        "Exercise guidelines and fitness information.",
        "https://www.acsm.org",
        HealthCategory::Exercise,
    ),
    resource(
        "CDC Physical Activity Guidelines",
        "Official physical activity recommendations.",
        "https://www.cdc.gov/physicalactivity",
        HealthCategory::Exercise,
    ),
    resource(
        "CDC Health Information",
        "Comprehensive health information from the Centers for Disease Control.",
        "https://www.cdc.gov",
        HealthCategory::General,
    ),
    resource(
        "Mayo Clinic Health Library",
        "Expert health information and resources.",
        "https://www.mayoclinic.org",
        HealthCategory::General,
    ),
    resource(
        "World Health Organization",
        "Global health information and guidelines.",
        "https://www.who.int",
        HealthCategory::General,
    ),
];

/// Filtrera resurser på kategori (None = alla) och fritext i titel eller beskrivning.
/// Katalogens ordning behålls.
pub fn filter_resources(category: Option<HealthCategory>, query: &str) -> Vec<&'static HealthResource> {
    let query = query.trim().to_lowercase();

    HEALTH_RESOURCES
        .iter()
        .filter(|r| category.map_or(true, |c| r.category == c))
        .filter(|r| {
            query.is_empty()
                || r.title.to_lowercase().contains(&query)
                || r.description.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_covers_every_category() {
        assert_eq!(HEALTH_RESOURCES.len(), 17);
        for category in HealthCategory::all() {
            assert!(
                HEALTH_RESOURCES.iter().any(|r| r.category == *category),
                "saknar resurser för {}",
                category
            );
        }

        let urls: HashSet<_> = HEALTH_RESOURCES.iter().map(|r| r.url).collect();
        assert_eq!(urls.len(), HEALTH_RESOURCES.len());
        assert!(HEALTH_RESOURCES.iter().all(|r| r.url.starts_with("https://")));
    }

    #[test]
    fn test_filter_by_category() {
        let heart = filter_resources(Some(HealthCategory::Heart), "");
        assert_eq!(
            heart.iter().map(|r| r.title).collect::<Vec<_>>(),
            vec!["American Heart Association", "Heart Foundation"]
        );
        assert_eq!(filter_resources(None, "").len(), HEALTH_RESOURCES.len());
    }

    #[test]
    fn test_search_title_and_description() {
        let hits = filter_resources(None, "  GUIDELINES ");
        assert!(hits.iter().any(|r| r.title == "Global Initiative for Asthma"));
        assert!(hits.iter().any(|r| r.title == "World Health Organization"));

        let general = filter_resources(Some(HealthCategory::General), "mayo");
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].url, "https://www.mayoclinic.org");

        assert!(filter_resources(Some(HealthCategory::Cancer), "asthma").is_empty());
    }
}
