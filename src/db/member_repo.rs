use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::lock;
use super::schema::MEMBER_COLUMNS;
use crate::models::{FamilyMember, HealthStatus};
use crate::utils::error::{AppError, AppResult};

pub struct MemberRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MemberRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta alla medlemmar i skapandeordning
    pub fn find_all(&self) -> AppResult<Vec<FamilyMember>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM family_members ORDER BY id",
            MEMBER_COLUMNS
        ))?;

        let members = stmt
            .query_map([], Self::row_to_member)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }

    /// Hämta medlem via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<FamilyMember>> {
        let conn = lock(&self.conn)?;
        let member = conn
            .query_row(
                &format!("SELECT {} FROM family_members WHERE id = ?", MEMBER_COLUMNS),
                [id],
                Self::row_to_member,
            )
            .optional()?;

        Ok(member)
    }

    /// Hämta medlem eller NotFound
    pub fn get(&self, id: i64) -> AppResult<FamilyMember> {
        self.find_by_id(id)?
            .ok_or_else(|| AppError::member_not_found(id))
    }

    /// Direkta barn (härledda från föräldrareferensen)
    pub fn find_children(&self, parent_id: i64) -> AppResult<Vec<FamilyMember>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM family_members WHERE parent_id = ? ORDER BY id",
            MEMBER_COLUMNS
        ))?;

        let members = stmt
            .query_map([parent_id], Self::row_to_member)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }

    /// Sök på namn (skiftlägesokänsligt). Tom fråga ger alla.
    pub fn search(&self, query: &str) -> AppResult<Vec<FamilyMember>> {
        let query = query.trim();
        if query.is_empty() {
            return self.find_all();
        }

        // LIKE är bara skiftlägesokänsligt för ASCII, så jämför i Rust
        let needle = query.to_lowercase();
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// ID för alla förfäder till en medlem (föräldrakedjan uppåt)
    ///
    /// UNION gör att frågan terminerar även om data mot förmodan innehåller en cykel.
    pub fn ancestor_ids(&self, id: i64) -> AppResult<BTreeSet<i64>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "WITH RECURSIVE chain(id) AS (
                 SELECT parent_id FROM family_members WHERE id = ?1 AND parent_id IS NOT NULL
                 UNION
                 SELECT m.parent_id FROM family_members m
                 JOIN chain c ON m.id = c.id
                 WHERE m.parent_id IS NOT NULL
             )
             SELECT id FROM chain",
        )?;

        let ids = stmt
            .query_map([id], |row| row.get::<_, i64>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(ids)
    }

    /// Skapa ny medlem
    pub fn insert(&self, member: &mut FamilyMember) -> AppResult<i64> {
        member.validate()?;

        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO family_members (name, age, birth_date, deceased, last_checkup, notes,
                                         health_conditions, medications, allergies, health_status,
                                         generation, level, parent_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                member.name.trim(),
                member.age,
                member.birth_date,
                member.deceased,
                member.last_checkup,
                member.notes,
                serde_json::to_string(&member.health_conditions)?,
                serde_json::to_string(&member.medications)?,
                serde_json::to_string(&member.allergies)?,
                member.health_status.to_string(),
                member.generation,
                member.level,
                member.parent_id,
            ],
        )?;

        let id = conn.last_insert_rowid();
        member.id = Some(id);

        Ok(id)
    }

    /// Uppdatera medlem
    pub fn update(&self, member: &FamilyMember) -> AppResult<()> {
        let id = member
            .id
            .ok_or_else(|| AppError::other("Medlemmen har inget ID"))?;
        member.validate()?;

        let conn = lock(&self.conn)?;
        let rows = conn.execute(
            "UPDATE family_members SET
                name = ?1, age = ?2, birth_date = ?3, deceased = ?4, last_checkup = ?5,
                notes = ?6, health_conditions = ?7, medications = ?8, allergies = ?9,
                health_status = ?10, generation = ?11, level = ?12, parent_id = ?13,
                updated_at = datetime('now')
             WHERE id = ?14",
            params![
                member.name.trim(),
                member.age,
                member.birth_date,
                member.deceased,
                member.last_checkup,
                member.notes,
                serde_json::to_string(&member.health_conditions)?,
                serde_json::to_string(&member.medications)?,
                serde_json::to_string(&member.allergies)?,
                member.health_status.to_string(),
                member.generation,
                member.level,
                member.parent_id,
                id,
            ],
        )?;

        if rows == 0 {
            return Err(AppError::member_not_found(id));
        }

        Ok(())
    }

    /// Ta bort medlem och gör dess barn till rötter, i en transaktion.
    ///
    /// Returnerar ID för barnen som blev rötter.
    pub fn delete_detaching_children(&self, id: i64) -> AppResult<Vec<i64>> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;

        let children = {
            let mut stmt = tx.prepare("SELECT id FROM family_members WHERE parent_id = ? ORDER BY id")?;
            let ids = stmt
                .query_map([id], |row| row.get::<_, i64>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            ids
        };

        tx.execute(
            "UPDATE family_members SET parent_id = NULL, updated_at = datetime('now')
             WHERE parent_id = ?",
            [id],
        )?;

        let rows = tx.execute("DELETE FROM family_members WHERE id = ?", [id])?;
        if rows == 0 {
            // Transaktionen rullas tillbaka när tx släpps
            return Err(AppError::member_not_found(id));
        }

        tx.commit()?;
        Ok(children)
    }

    /// Räkna antal medlemmar
    pub fn count(&self) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM family_members", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_member(row: &Row) -> rusqlite::Result<FamilyMember> {
        let status: String = row.get(10)?;
        Ok(FamilyMember {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            birth_date: row.get(3)?,
            deceased: row.get(4)?,
            last_checkup: row.get(5)?,
            notes: row.get(6)?,
            health_conditions: Self::label_set(row, 7)?,
            medications: Self::label_set(row, 8)?,
            allergies: Self::label_set(row, 9)?,
            health_status: HealthStatus::from_db_str(&status),
            generation: row.get(11)?,
            level: row.get(12)?,
            parent_id: row.get(13)?,
            created_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }

    fn label_set(row: &Row, idx: usize) -> rusqlite::Result<BTreeSet<String>> {
        let raw: String = row.get(idx)?;
        serde_json::from_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::MemberValidationError;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let db = setup_db();
        let repo = db.members();

        let mut member = FamilyMember::new("Alice")
            .with_age(62)
            .with_conditions(["Diabetes", "Hypertension"]);
        member.allergies.insert("Peanuts".into());
        member.health_status = HealthStatus::AtRisk;
        member.generation = -1;
        member.level = -2;

        let id = repo.insert(&mut member).unwrap();
        assert!(id > 0);

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.name, "Alice");
        assert_eq!(found.age, 62);
        assert_eq!(found.birth_date, member.birth_date);
        assert_eq!(found.health_conditions, member.health_conditions);
        assert!(found.allergies.contains("Peanuts"));
        assert_eq!(found.health_status, HealthStatus::AtRisk);
        assert_eq!((found.generation, found.level), (-1, -2));
        assert!(found.created_at.is_some());
    }

    #[test]
    fn test_insert_rejects_empty_name() {
        let db = setup_db();
        let mut member = FamilyMember::new("  ");

        let err = db.members().insert(&mut member).unwrap_err();
        assert!(matches!(err, AppError::Validation(MemberValidationError::EmptyName)));
        assert_eq!(db.members().count().unwrap(), 0);
    }

    #[test]
    fn test_find_children_and_ancestors() {
        let db = setup_db();
        let repo = db.members();

        let mut root = FamilyMember::new("Rot");
        let root_id = repo.insert(&mut root).unwrap();

        let mut child = FamilyMember::new("Barn");
        child.parent_id = Some(root_id);
        let child_id = repo.insert(&mut child).unwrap();

        let mut grandchild = FamilyMember::new("Barnbarn");
        grandchild.parent_id = Some(child_id);
        let grandchild_id = repo.insert(&mut grandchild).unwrap();

        let children: Vec<_> = repo.find_children(root_id).unwrap().iter().filter_map(|m| m.id).collect();
        assert_eq!(children, vec![child_id]);

        let ancestors = repo.ancestor_ids(grandchild_id).unwrap();
        assert_eq!(ancestors.into_iter().collect::<Vec<_>>(), vec![root_id, child_id]);
        assert!(repo.ancestor_ids(root_id).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let db = setup_db();
        let repo = db.members();

        for name in ["Åsa Lind", "Bertil", "åke"] {
            repo.insert(&mut FamilyMember::new(name)).unwrap();
        }

        assert_eq!(repo.search("ÅS").unwrap().len(), 1);
        assert_eq!(repo.search("å").unwrap().len(), 2);
        assert_eq!(repo.search("").unwrap().len(), 3);
        assert!(repo.search("zz").unwrap().is_empty());
    }

    #[test]
    fn test_delete_detaches_children() {
        let db = setup_db();
        let repo = db.members();

        let mut parent = FamilyMember::new("Förälder");
        let parent_id = repo.insert(&mut parent).unwrap();

        let mut child = FamilyMember::new("Barn");
        child.parent_id = Some(parent_id);
        let child_id = repo.insert(&mut child).unwrap();

        let orphaned = repo.delete_detaching_children(parent_id).unwrap();
        assert_eq!(orphaned, vec![child_id]);
        assert!(repo.find_by_id(parent_id).unwrap().is_none());
        assert_eq!(repo.get(child_id).unwrap().parent_id, None);
    }

    #[test]
    fn test_delete_missing_member_leaves_store_unchanged() {
        let db = setup_db();
        let repo = db.members();

        let mut member = FamilyMember::new("Kvar");
        repo.insert(&mut member).unwrap();

        let err = repo.delete_detaching_children(999).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_missing_member() {
        let db = setup_db();
        let ghost = FamilyMember {
            id: Some(77),
            ..FamilyMember::new("Spöke")
        };

        assert!(db.members().update(&ghost).unwrap_err().is_not_found());
    }
}
