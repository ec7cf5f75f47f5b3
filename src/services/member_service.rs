//! Skapa, ändra och radera familjemedlemmar
//!
//! All skrivning till släktträdet går via den här tjänsten så att
//! föräldralänkar, generation och nivå hålls konsekventa.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::info;

use crate::db::Database;
use crate::models::{FamilyMember, HealthStatus, MemberValidationError, RelationshipType};
use crate::services::events::{LoggingListener, TreeEvent, TreeListener};
use crate::utils::date::today;
use crate::utils::error::AppResult;

/// Fältändringar för en befintlig medlem. `None` = lämna oförändrat.
#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub health_status: Option<HealthStatus>,
    pub generation: Option<i32>,
    pub level: Option<i32>,
    /// `Some(None)` kopplar loss medlemmen så att den blir en rot
    pub parent: Option<Option<i64>>,
    pub age: Option<u32>,
    /// Vinner över `age` om båda anges
    pub birth_date: Option<NaiveDate>,
    pub deceased: Option<bool>,
    pub last_checkup: Option<NaiveDate>,
    pub notes: Option<String>,
    pub health_conditions: Option<BTreeSet<String>>,
    pub medications: Option<BTreeSet<String>>,
    pub allergies: Option<BTreeSet<String>>,
}

impl MemberPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn health_status(mut self, status: HealthStatus) -> Self {
        self.health_status = Some(status);
        self
    }

    pub fn position(mut self, generation: i32, level: i32) -> Self {
        self.generation = Some(generation);
        self.level = Some(level);
        self
    }

    pub fn parent(mut self, parent_id: Option<i64>) -> Self {
        self.parent = Some(parent_id);
        self
    }

    fn apply(self, member: &mut FamilyMember, today: NaiveDate) -> Result<(), MemberValidationError> {
        if let Some(name) = self.name {
            member.name = name.trim().to_string();
        }
        if let Some(status) = self.health_status {
            member.health_status = status;
        }
        if let Some(generation) = self.generation {
            member.generation = generation;
        }
        if let Some(level) = self.level {
            member.level = level;
        }
        if let Some(parent_id) = self.parent {
            member.parent_id = parent_id;
        }
        if let Some(age) = self.age {
            member.set_age(age, today)?;
        }
        if let Some(birth_date) = self.birth_date {
            member.set_birth_date(birth_date, today);
        }
        if let Some(deceased) = self.deceased {
            member.deceased = deceased;
        }
        if let Some(last_checkup) = self.last_checkup {
            member.last_checkup = last_checkup;
        }
        if let Some(notes) = self.notes {
            member.notes = notes;
        }
        if let Some(conditions) = self.health_conditions {
            member.health_conditions = conditions;
        }
        if let Some(medications) = self.medications {
            member.medications = medications;
        }
        if let Some(allergies) = self.allergies {
            member.allergies = allergies;
        }
        Ok(())
    }
}

/// Tjänst för ändringar i släktträdet
pub struct MemberService<'a> {
    db: &'a Database,
    listeners: Vec<Box<dyn TreeListener + 'a>>,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            listeners: vec![Box::new(LoggingListener)],
        }
    }

    /// Lägg till en lyssnare som notifieras efter varje lyckad ändring
    pub fn subscribe(&mut self, listener: Box<dyn TreeListener + 'a>) {
        self.listeners.push(listener);
    }

    pub fn with_listener(mut self, listener: impl TreeListener + 'a) -> Self {
        self.subscribe(Box::new(listener));
        self
    }

    /// Skapa en ny medlem relativt ett valfritt ankare.
    ///
    /// Med ankare hamnar medlemmen under ankaret (ankarets barnlista)
    /// och får ankarets generation/nivå plus relationens delta.
    pub fn create(
        &self,
        mut member: FamilyMember,
        anchor_id: Option<i64>,
        relationship: RelationshipType,
    ) -> AppResult<FamilyMember> {
        member.id = None;
        member.name = member.name.trim().to_string();
        member.validate()?;

        let anchor = match anchor_id {
            Some(id) => Some(self.db.members().get(id)?),
            None => None,
        };

        let (generation, level) =
            relationship.position_for(anchor.as_ref().map(|a| (a.generation, a.level)));
        member.generation = generation;
        member.level = level;
        member.parent_id = anchor_id;

        let id = self.db.members().insert(&mut member)?;
        info!(
            "Skapade {} (ID {}) som {} till {:?}, generation {}, nivå {}",
            member.name,
            id,
            relationship.display_name(),
            anchor.as_ref().map(|a| a.name.as_str()),
            generation,
            level
        );

        self.notify(TreeEvent::MemberCreated { id });
        self.db.members().get(id)
    }

    /// Uppdatera fält på en medlem.
    ///
    /// Byte av förälder räknar inte om generation eller nivå.
    pub fn update(&self, id: i64, patch: MemberPatch) -> AppResult<FamilyMember> {
        let mut member = self.db.members().get(id)?;

        if let Some(Some(new_parent)) = patch.parent {
            if member.parent_id != Some(new_parent) {
                self.check_new_parent(id, new_parent)?;
            }
        }

        patch.apply(&mut member, today())?;
        member.validate()?;

        self.db.members().update(&member)?;
        info!("Uppdaterade {} (ID {})", member.name, id);

        self.notify(TreeEvent::MemberUpdated { id });
        self.db.members().get(id)
    }

    /// Radera en medlem. Barnen blir rötter och flyttas inte upp ett steg.
    ///
    /// Returnerar ID för barnen som kopplades loss.
    pub fn delete(&self, id: i64) -> AppResult<Vec<i64>> {
        let orphaned = self.db.members().delete_detaching_children(id)?;
        info!("Raderade medlem {} ({} barn blev rötter)", id, orphaned.len());

        self.notify(TreeEvent::MemberDeleted {
            id,
            orphaned: orphaned.clone(),
        });
        Ok(orphaned)
    }

    /// Avvisa självreferens och cykler innan föräldern byts
    fn check_new_parent(&self, id: i64, new_parent: i64) -> AppResult<()> {
        if new_parent == id {
            return Err(MemberValidationError::SelfReference.into());
        }

        // Föräldern måste finnas
        self.db.members().get(new_parent)?;

        // Om medlemmen redan är förfader till den nya föräldern uppstår en cykel
        if self.db.members().ancestor_ids(new_parent)?.contains(&id) {
            return Err(MemberValidationError::CycleDetected.into());
        }

        Ok(())
    }

    fn notify(&self, event: TreeEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }
}
