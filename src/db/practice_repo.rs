use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use super::lock;
use crate::models::CulturalPractice;
use crate::utils::error::AppResult;

/// Läsåtkomst till kulturella traditioner. Katalogen skrivs bara av migrationerna.
pub struct PracticeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PracticeRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn find_all(&self) -> AppResult<Vec<CulturalPractice>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, region, category, health_benefits, health_considerations
             FROM cultural_practices
             ORDER BY id",
        )?;

        let practices = stmt
            .query_map([], Self::row_to_practice)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(practices)
    }

    pub fn find_by_category(&self, category: &str) -> AppResult<Vec<CulturalPractice>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, region, category, health_benefits, health_considerations
             FROM cultural_practices
             WHERE category = ?
             ORDER BY id",
        )?;

        let practices = stmt
            .query_map([category], Self::row_to_practice)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(practices)
    }

    /// Alla kategorier i bokstavsordning
    pub fn categories(&self) -> AppResult<Vec<String>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT DISTINCT category FROM cultural_practices ORDER BY category")?;

        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(categories)
    }

    /// Fritextsökning i namn, beskrivning och region
    pub fn search(&self, query: &str) -> AppResult<Vec<CulturalPractice>> {
        let needle = query.trim().to_lowercase();
        let all = self.find_all()?;
        if needle.is_empty() {
            return Ok(all);
        }

        Ok(all
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.region.to_lowercase().contains(&needle)
            })
            .collect())
    }

    fn row_to_practice(row: &Row) -> rusqlite::Result<CulturalPractice> {
        Ok(CulturalPractice {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            region: row.get(3)?,
            category: row.get(4)?,
            health_benefits: row.get(5)?,
            health_considerations: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    #[test]
    fn test_seeded_catalog() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.practices();

        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].name, "Ayurveda");

        assert_eq!(
            repo.categories().unwrap(),
            vec!["Mental Health", "Nutrition", "Physical Activity", "Traditional Medicine", "Wellness"]
        );
        assert_eq!(repo.find_by_category("Wellness").unwrap().len(), 2);
        assert!(repo.find_by_category("Okänd").unwrap().is_empty());
    }

    #[test]
    fn test_search() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.practices();

        let japan: Vec<_> = repo.search("japan").unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(japan, vec!["Forest Bathing"]);
        assert_eq!(repo.search("global").unwrap().len(), 3);
        assert_eq!(repo.search("   ").unwrap().len(), 8);
    }
}
