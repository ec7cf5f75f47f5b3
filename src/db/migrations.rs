use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use super::schema::{CREATE_TABLES, SCHEMA_VERSION};
use crate::models::CulturalPractice;

/// Kör alla nödvändiga migrationer
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_current_version(conn)?;

    if current_version == 0 {
        // Ny databas - skapa allt
        info!("Skapar ny databas med schema version {}", SCHEMA_VERSION);
        initial_setup(conn)?;
    } else if current_version < SCHEMA_VERSION {
        // Uppdatera befintlig databas
        info!(
            "Migrerar databas från version {} till {}",
            current_version, SCHEMA_VERSION
        );
        migrate_from(conn, current_version)?;
    } else {
        info!("Databas är uppdaterad (version {})", current_version);
    }

    Ok(())
}

fn get_current_version(conn: &Connection) -> Result<i32> {
    // Kontrollera om schema_migrations-tabellen finns
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_migrations')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn.query_row(
        "SELECT MAX(version) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    Ok(version.unwrap_or(0))
}

fn initial_setup(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;

    insert_default_practices(conn)?;

    conn.execute(
        "INSERT INTO schema_migrations (version) VALUES (?)",
        [SCHEMA_VERSION],
    )?;

    info!("Initial setup klar");
    Ok(())
}

fn insert_default_practices(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO cultural_practices
            (name, description, region, category, health_benefits, health_considerations)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    let practices = CulturalPractice::default_practices();
    for p in &practices {
        stmt.execute([
            &p.name,
            &p.description,
            &p.region,
            &p.category,
            &p.health_benefits,
            &p.health_considerations,
        ])?;
    }

    info!("Lade till {} kulturella traditioner", practices.len());
    Ok(())
}

fn migrate_from(conn: &Connection, from_version: i32) -> Result<()> {
    // Kör migrationer stegvis
    for version in (from_version + 1)..=SCHEMA_VERSION {
        match version {
            2 => migrate_v1_to_v2(conn)?,
            _ => {}
        }

        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            [version],
        )?;

        info!("Migrerade till version {}", version);
    }

    Ok(())
}

/// Migration v1 -> v2: Läkemedel, allergier och traditionskatalogen
///
/// Version 1 samlade in läkemedel och allergier i formuläret men lagrade
/// bara tillstånden, och traditionerna fanns bara i koden.
fn migrate_v1_to_v2(conn: &Connection) -> Result<()> {
    info!("Migration v2: Lägger till medications, allergies och cultural_practices");

    conn.execute_batch(
        "ALTER TABLE family_members ADD COLUMN medications TEXT NOT NULL DEFAULT '[]';
         ALTER TABLE family_members ADD COLUMN allergies TEXT NOT NULL DEFAULT '[]';",
    )?;

    // Övriga tabeller och index skapas om de saknas
    conn.execute_batch(CREATE_TABLES)?;
    insert_default_practices(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_initial_migration() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        // Verifiera att tabeller skapades
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"family_members".to_string()));
        assert!(tables.contains(&"cultural_practices".to_string()));

        let practices: i64 = conn
            .query_row("SELECT COUNT(*) FROM cultural_practices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(practices, 8);
    }

    #[test]
    fn test_idempotent_migration() {
        let conn = Connection::open_in_memory().unwrap();

        // Kör migrationer två gånger
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_current_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        // Referensdatan ska inte dupliceras
        let practices: i64 = conn
            .query_row("SELECT COUNT(*) FROM cultural_practices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(practices, 8);
    }

    #[test]
    fn test_migrate_v1_database() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE family_members (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                age INTEGER NOT NULL DEFAULT 0,
                birth_date TEXT NOT NULL,
                deceased INTEGER NOT NULL DEFAULT 0,
                last_checkup TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                health_conditions TEXT NOT NULL DEFAULT '[]',
                health_status TEXT NOT NULL DEFAULT 'healthy',
                generation INTEGER NOT NULL DEFAULT 0,
                level INTEGER NOT NULL DEFAULT 0,
                parent_id INTEGER,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE TABLE schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            INSERT INTO schema_migrations (version) VALUES (1);
            INSERT INTO family_members (name, birth_date, last_checkup)
                VALUES ('Alice', '1950-01-01', '2025-01-01');",
        )
        .unwrap();

        run_migrations(&conn).unwrap();
        assert_eq!(get_current_version(&conn).unwrap(), 2);

        let allergies: String = conn
            .query_row("SELECT allergies FROM family_members WHERE name = 'Alice'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(allergies, "[]");

        let practices: i64 = conn
            .query_row("SELECT COUNT(*) FROM cultural_practices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(practices, 8);
    }
}
