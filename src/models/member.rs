use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::{birth_date_for_age, calculate_age, today, MAX_AGE};

/// Hälsostatus för en familjemedlem (endast för visning, beräknas aldrig)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HealthStatus {
    #[default]
    Healthy,
    AtRisk,
    NeedsAttention,
    Critical,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Frisk",
            Self::AtRisk => "Riskzon",
            Self::NeedsAttention => "Behöver uppmärksamhet",
            Self::Critical => "Kritisk",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Healthy => "❤",
            Self::AtRisk => "⚠",
            Self::NeedsAttention => "❗",
            Self::Critical => "✚",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Healthy, Self::AtRisk, Self::NeedsAttention, Self::Critical]
    }

    pub fn from_db_str(s: &str) -> Self {
        match s {
            "at_risk" => Self::AtRisk,
            "needs_attention" => Self::NeedsAttention,
            "critical" => Self::Critical,
            _ => Self::Healthy,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::AtRisk => write!(f, "at_risk"),
            Self::NeedsAttention => write!(f, "needs_attention"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// En familjemedlem med hälsouppgifter och position i trädet.
///
/// Endast föräldrareferensen lagras. Barnlistor härleds vid behov
/// från alla poster, så länken kan aldrig bli halvt uppdaterad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: Option<i64>,
    pub name: String,
    pub age: u32,
    pub birth_date: NaiveDate,
    pub deceased: bool,
    pub last_checkup: NaiveDate,
    pub notes: String,
    pub health_conditions: BTreeSet<String>,
    pub medications: BTreeSet<String>,
    pub allergies: BTreeSet<String>,
    pub health_status: HealthStatus,
    pub generation: i32,
    pub level: i32,
    pub parent_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Default for FamilyMember {
    fn default() -> Self {
        let today = today();
        Self {
            id: None,
            name: String::new(),
            age: 0,
            birth_date: today,
            deceased: false,
            last_checkup: today,
            notes: String::new(),
            health_conditions: BTreeSet::new(),
            medications: BTreeSet::new(),
            allergies: BTreeSet::new(),
            health_status: HealthStatus::default(),
            generation: 0,
            level: 0,
            parent_id: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl FamilyMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sätt ålder och härled födelsedatum (1 januari aktuellt år minus ålder).
    /// Medlemmen lämnas orörd om åldern är orimlig.
    pub fn set_age(&mut self, age: u32, today: NaiveDate) -> Result<(), MemberValidationError> {
        if age > MAX_AGE {
            return Err(MemberValidationError::AgeOutOfRange(age));
        }
        let birth_date =
            birth_date_for_age(age, today).ok_or(MemberValidationError::AgeOutOfRange(age))?;

        self.age = age;
        self.birth_date = birth_date;
        Ok(())
    }

    /// Sätt födelsedatum och räkna om åldern
    pub fn set_birth_date(&mut self, birth_date: NaiveDate, today: NaiveDate) {
        self.birth_date = birth_date;
        self.age = calculate_age(birth_date, today);
    }

    #[cfg(test)]
    pub fn with_age(mut self, age: u32) -> Self {
        self.set_age(age, today()).expect("rimlig ålder i test");
        self
    }

    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.health_conditions = conditions.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Första bokstaven i namnet, visas i trädnoden
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn health_icon(&self) -> &'static str {
        self.health_status.icon()
    }

    pub fn conditions_display(&self) -> String {
        if self.health_conditions.is_empty() {
            return "Inga kända tillstånd".to_string();
        }
        self.health_conditions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }

        if let (Some(id), Some(parent_id)) = (self.id, self.parent_id) {
            if id == parent_id {
                return Err(MemberValidationError::SelfReference);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Namn krävs")]
    EmptyName,
    #[error("En medlem kan inte vara sin egen förälder")]
    SelfReference,
    #[error("Den valda föräldern är en ättling till medlemmen")]
    CycleDetected,
    #[error("Orimlig ålder: {0} (högst {max})", max = MAX_AGE)]
    AgeOutOfRange(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_and_birth_date_stay_consistent() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        let mut member = FamilyMember::new("Alice");

        member.set_age(30, today).unwrap();
        assert_eq!(member.birth_date, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap());

        member.set_birth_date(NaiveDate::from_ymd_opt(1960, 8, 1).unwrap(), today);
        assert_eq!(member.age, 64);
    }

    #[test]
    fn test_unreasonable_age_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let mut member = FamilyMember::new("Alice");
        member.set_age(40, today).unwrap();

        assert_eq!(
            member.set_age(2_147_484_000, today),
            Err(MemberValidationError::AgeOutOfRange(2_147_484_000))
        );
        assert_eq!(member.set_age(151, today), Err(MemberValidationError::AgeOutOfRange(151)));
        assert_eq!(member.age, 40);
        assert_eq!(member.birth_date, NaiveDate::from_ymd_opt(1985, 1, 1).unwrap());

        member.set_age(150, today).unwrap();
        assert_eq!(member.birth_date, NaiveDate::from_ymd_opt(1875, 1, 1).unwrap());
    }

    #[test]
    fn test_validation() {
        assert!(FamilyMember::new("Bob").validate().is_ok());
        assert_eq!(
            FamilyMember::new("   ").validate(),
            Err(MemberValidationError::EmptyName)
        );

        let looped = FamilyMember {
            id: Some(3),
            parent_id: Some(3),
            ..FamilyMember::new("Carol")
        };
        assert_eq!(looped.validate(), Err(MemberValidationError::SelfReference));
    }

    #[test]
    fn test_display_helpers() {
        let member = FamilyMember::new("élise").with_conditions(["Asthma", "Diabetes"]);
        assert_eq!(member.initial(), "É");
        assert_eq!(member.conditions_display(), "Asthma, Diabetes");
        assert!(member.is_root());
        assert_eq!(FamilyMember::new("").initial(), "?");
    }

    #[test]
    fn test_health_status_db_roundtrip() {
        for status in HealthStatus::all() {
            assert_eq!(HealthStatus::from_db_str(&status.to_string()), *status);
        }
        assert_eq!(HealthStatus::from_db_str("okänt"), HealthStatus::Healthy);
    }
}
