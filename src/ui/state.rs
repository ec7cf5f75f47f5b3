use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::db::Database;
use crate::models::{FamilyMember, HealthStatus, RelationshipType};
use crate::services::{MemberPatch, MemberService, RefreshFlag};
use crate::utils::date::{format_date, parse_date, today};

/// Aktuell vy i applikationen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    FamilyTree,
    MemberList,
    MemberDetail,
    HealthOverview,
    HealthResources,
    CulturalPractices,
    Settings,
}

/// Centraliserat applikationstillstånd
#[derive(Debug, Default)]
pub struct AppState {
    /// Aktuell vy
    pub current_view: View,

    /// Vald medlem (för detaljvy)
    pub selected_member_id: Option<i64>,

    /// Visar medlemsformulär
    pub show_member_form: bool,

    /// Medlem som redigeras (None = ny medlem)
    pub editing_member_id: Option<i64>,

    /// Förvalt ankare när formuläret öppnas från en nod
    pub form_anchor_id: Option<i64>,

    /// Visar bekräftelsedialog
    pub show_confirm_dialog: bool,
    pub confirm_dialog_message: String,
    pub confirm_dialog_action: Option<ConfirmAction>,

    /// Statusmeddelande
    pub status_message: Option<StatusMessage>,

    /// Sätts av medlemstjänsten efter varje sparad ändring
    pub tree_changed: RefreshFlag,

    /// Dark mode
    pub dark_mode: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigera till vy
    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
    }

    /// Navigera till medlemsdetalj
    pub fn navigate_to_member(&mut self, member_id: i64) {
        self.selected_member_id = Some(member_id);
        self.current_view = View::MemberDetail;
    }

    /// Öppna formulär för ny medlem, valfritt relativt ett ankare
    pub fn open_new_member_form(&mut self, anchor_id: Option<i64>) {
        self.editing_member_id = None;
        self.form_anchor_id = anchor_id;
        self.show_member_form = true;
    }

    /// Öppna formulär för redigering
    pub fn open_edit_member_form(&mut self, member_id: i64) {
        self.editing_member_id = Some(member_id);
        self.form_anchor_id = None;
        self.show_member_form = true;
    }

    /// Stäng medlemsformulär
    pub fn close_member_form(&mut self) {
        self.show_member_form = false;
        self.editing_member_id = None;
        self.form_anchor_id = None;
    }

    /// Medlemstjänst kopplad till vyernas uppdateringsflagga
    pub fn member_service<'a>(&self, db: &'a Database) -> MemberService<'a> {
        MemberService::new(db).with_listener(self.tree_changed.clone())
    }

    /// Visa bekräftelsedialog
    pub fn show_confirm(&mut self, message: &str, action: ConfirmAction) {
        self.confirm_dialog_message = message.to_string();
        self.confirm_dialog_action = Some(action);
        self.show_confirm_dialog = true;
    }

    /// Stäng bekräftelsedialog
    pub fn close_confirm(&mut self) {
        self.show_confirm_dialog = false;
        self.confirm_dialog_action = None;
    }

    /// Visa statusmeddelande
    pub fn show_status(&mut self, message: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: message.to_string(),
            status_type,
            created_at: std::time::Instant::now(),
        });
    }

    /// Visa framgångsmeddelande
    pub fn show_success(&mut self, message: &str) {
        self.show_status(message, StatusType::Success);
    }

    /// Visa felmeddelande
    pub fn show_error(&mut self, message: &str) {
        self.show_status(message, StatusType::Error);
    }

    /// Rensa statusmeddelande om det är för gammalt
    pub fn clear_old_status(&mut self) {
        if let Some(ref status) = self.status_message {
            if status.created_at.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }
}

/// Typ av bekräftelseåtgärd
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteMember(i64),
}

/// Statusmeddelande
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub status_type: StatusType,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Success,
    Error,
    Info,
    Warning,
}

/// Formulärdata för medlem
#[derive(Debug, Clone)]
pub struct MemberFormData {
    pub name: String,
    pub age: String,
    pub birth_date: String,
    /// Tom = lämna oförändrad
    pub last_checkup: String,
    pub deceased: bool,
    pub notes: String,
    pub health_status: HealthStatus,
    pub anchor_id: Option<i64>,
    pub relationship: RelationshipType,
    /// Redigering: ny förälder, None = rot
    pub parent_id: Option<i64>,
    pub generation: i32,
    pub level: i32,
    pub conditions: BTreeSet<String>,
    pub medications: BTreeSet<String>,
    pub allergies: BTreeSet<String>,
    /// Fritext för egna tillstånd, kommaseparerad
    pub custom_conditions: String,
}

impl Default for MemberFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: "0".to_string(),
            birth_date: String::new(),
            last_checkup: String::new(),
            deceased: false,
            notes: String::new(),
            health_status: HealthStatus::default(),
            anchor_id: None,
            relationship: RelationshipType::default(),
            parent_id: None,
            generation: 0,
            level: 0,
            conditions: BTreeSet::new(),
            medications: BTreeSet::new(),
            allergies: BTreeSet::new(),
            custom_conditions: String::new(),
        }
    }
}

impl MemberFormData {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn from_member(member: &FamilyMember) -> Self {
        Self {
            name: member.name.clone(),
            age: member.age.to_string(),
            birth_date: format_date(member.birth_date),
            last_checkup: format_date(member.last_checkup),
            deceased: member.deceased,
            notes: member.notes.clone(),
            health_status: member.health_status,
            anchor_id: None,
            relationship: RelationshipType::default(),
            parent_id: member.parent_id,
            generation: member.generation,
            level: member.level,
            conditions: member.health_conditions.clone(),
            medications: member.medications.clone(),
            allergies: member.allergies.clone(),
            custom_conditions: String::new(),
        }
    }

    /// Spara-knappen är avstängd tills ett namn finns
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty()
    }

    fn all_conditions(&self) -> BTreeSet<String> {
        let mut conditions = self.conditions.clone();
        conditions.extend(
            self.custom_conditions
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        );
        conditions
    }

    fn parse_age(&self) -> Result<Option<u32>, String> {
        let age = self.age.trim();
        if age.is_empty() {
            return Ok(None);
        }
        age.parse::<u32>()
            .map(Some)
            .map_err(|_| format!("Ogiltig ålder: {}", age))
    }

    fn parse_optional_date(value: &str, field: &str) -> Result<Option<NaiveDate>, String> {
        match value.trim() {
            "" => Ok(None),
            s => parse_date(s)
                .map(Some)
                .ok_or_else(|| format!("Ogiltigt datum för {} (använd YYYY-MM-DD)", field)),
        }
    }

    /// Ny medlem från formuläret. Position sätts av tjänsten.
    pub fn to_new_member(&self) -> Result<FamilyMember, String> {
        let mut member = FamilyMember::new(self.name.trim());
        let today = today();

        if let Some(age) = self.parse_age()? {
            member.set_age(age, today).map_err(|e| e.to_string())?;
        }
        member.deceased = self.deceased;
        member.notes = self.notes.clone();
        member.health_status = self.health_status;
        member.health_conditions = self.all_conditions();
        member.medications = self.medications.clone();
        member.allergies = self.allergies.clone();

        Ok(member)
    }

    /// Ändringar för en befintlig medlem. Ett ifyllt födelsedatum vinner över åldern.
    pub fn to_patch(&self) -> Result<MemberPatch, String> {
        let birth_date = Self::parse_optional_date(&self.birth_date, "födelsedatum")?;
        let last_checkup = Self::parse_optional_date(&self.last_checkup, "senaste kontroll")?;

        Ok(MemberPatch {
            name: Some(self.name.clone()),
            health_status: Some(self.health_status),
            generation: Some(self.generation),
            level: Some(self.level),
            parent: Some(self.parent_id),
            age: if birth_date.is_none() { self.parse_age()? } else { None },
            birth_date,
            deceased: Some(self.deceased),
            last_checkup,
            notes: Some(self.notes.clone()),
            health_conditions: Some(self.all_conditions()),
            medications: Some(self.medications.clone()),
            allergies: Some(self.allergies.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_name() {
        let mut form = MemberFormData::default();
        assert!(!form.can_save());
        form.name = "  ".into();
        assert!(!form.can_save());
        form.name = "Alice".into();
        assert!(form.can_save());
    }

    #[test]
    fn test_new_member_from_form() {
        let mut form = MemberFormData {
            name: " Alice ".into(),
            age: "42".into(),
            custom_conditions: "Migrän, , Gikt".into(),
            ..Default::default()
        };
        form.conditions.insert("Asthma".into());

        let member = form.to_new_member().unwrap();
        assert_eq!(member.name, "Alice");
        assert_eq!(member.age, 42);
        assert_eq!(
            member.health_conditions.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Asthma", "Gikt", "Migrän"]
        );

        form.age = "fyrtio".into();
        assert!(form.to_new_member().is_err());

        form.age = "2147484000".into();
        assert!(form.to_new_member().is_err());
    }

    #[test]
    fn test_patch_from_form() {
        let mut member = FamilyMember::new("Bob");
        member.id = Some(2);
        member.parent_id = Some(1);
        member.generation = 1;
        member.level = 1;

        let mut form = MemberFormData::from_member(&member);
        form.birth_date = "1960-05-01".into();
        let patch = form.to_patch().unwrap();

        assert_eq!(patch.parent, Some(Some(1)));
        assert_eq!(patch.generation, Some(1));
        assert!(patch.birth_date.is_some());
        assert_eq!(patch.last_checkup, Some(member.last_checkup));

        form.last_checkup = "2024-11-03".into();
        assert_eq!(form.to_patch().unwrap().last_checkup, NaiveDate::from_ymd_opt(2024, 11, 3));

        form.last_checkup = String::new();
        assert_eq!(form.to_patch().unwrap().last_checkup, None);

        form.last_checkup = "snart".into();
        assert!(form.to_patch().is_err());
        form.last_checkup = String::new();

        form.birth_date = "igår".into();
        assert!(form.to_patch().is_err());
    }
}
