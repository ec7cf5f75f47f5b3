//! Statiska urvalslistor för hälsoformuläret

use std::collections::BTreeSet;

pub const COMMON_CONDITIONS: &[&str] = &[
    "Diabetes",
    "Hypertension",
    "Asthma",
    "Heart Disease",
    "Cancer",
    "Arthritis",
    "Allergies",
    "Obesity",
    "Depression",
    "Anxiety",
];

pub const MEDICATIONS_BY_CONDITION: &[(&str, &[&str])] = &[
    ("Diabetes", &["Metformin", "Insulin", "Glipizide"]),
    ("Hypertension", &["Lisinopril", "Amlodipine", "Hydrochlorothiazide"]),
    ("Asthma", &["Albuterol", "Fluticasone", "Montelukast"]),
    ("Heart Disease", &["Aspirin", "Atorvastatin", "Metoprolol"]),
    ("Cancer", &["Chemotherapy", "Immunotherapy"]),
    ("Arthritis", &["Ibuprofen", "Naproxen", "Methotrexate"]),
    ("Allergies", &["Loratadine", "Cetirizine", "Diphenhydramine"]),
    ("Obesity", &["Orlistat", "Phentermine"]),
    ("Depression", &["Sertraline", "Fluoxetine", "Citalopram"]),
    ("Anxiety", &["Alprazolam", "Diazepam", "Buspirone"]),
];

pub const COMMON_ALLERGIES: &[&str] = &[
    "Penicillin",
    "Peanuts",
    "Shellfish",
    "Latex",
    "Bee Stings",
    "Milk",
    "Eggs",
    "Tree Nuts",
    "Wheat",
    "Soy",
    "Fish",
];

/// Läkemedel för de valda tillstånden, sorterade och utan dubbletter
pub fn suggested_medications<'a, I>(conditions: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a String>,
{
    let selected: BTreeSet<&str> = conditions.into_iter().map(String::as_str).collect();

    MEDICATIONS_BY_CONDITION
        .iter()
        .filter(|(condition, _)| selected.contains(condition))
        .flat_map(|(_, meds)| meds.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_condition_has_medications() {
        for condition in COMMON_CONDITIONS {
            assert!(
                MEDICATIONS_BY_CONDITION.iter().any(|(c, _)| c == condition),
                "saknar läkemedel för {}",
                condition
            );
        }
    }

    #[test]
    fn test_suggested_medications_sorted() {
        let selected: BTreeSet<String> = ["Hypertension", "Diabetes", "Okänt"]
            .into_iter()
            .map(String::from)
            .collect();

        let meds = suggested_medications(&selected);
        assert_eq!(
            meds,
            vec![
                "Amlodipine",
                "Glipizide",
                "Hydrochlorothiazide",
                "Insulin",
                "Lisinopril",
                "Metformin",
            ]
        );
    }

    #[test]
    fn test_suggested_medications_empty() {
        let none: Vec<String> = Vec::new();
        assert!(suggested_medications(&none).is_empty());
    }
}
