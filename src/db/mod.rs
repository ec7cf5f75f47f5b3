pub mod schema;
pub mod migrations;
pub mod member_repo;
pub mod practice_repo;

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub use member_repo::MemberRepository;
pub use practice_repo::PracticeRepository;

use crate::utils::error::{AppError, AppResult};

/// Huvuddatabas-wrapper med thread-safe access
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Öppna eller skapa databas
    pub fn open(path: &Path) -> Result<Self> {
        // Skapa katalog om den inte finns
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Konfigurera SQLite
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            "
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Öppna in-memory databas (för tester)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Kör databasmigrationer
    pub fn migrate(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Databaslåset är förgiftat"))?;
        migrations::run_migrations(&conn)
    }

    /// Hämta medlems-repository
    pub fn members(&self) -> MemberRepository {
        MemberRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta repository för kulturella traditioner
    pub fn practices(&self) -> PracticeRepository {
        PracticeRepository::new(Arc::clone(&self.conn))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

/// Lås anslutningen utan att panika om låset är förgiftat
pub(crate) fn lock(conn: &Mutex<Connection>) -> AppResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| AppError::other("Databaslåset är förgiftat"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("heritage.db");

        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();
        assert!(path.exists());
        assert_eq!(db.members().count().unwrap(), 0);

        // Öppna igen, migrationer ska vara idempotenta
        drop(db);
        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();
        assert_eq!(db.practices().find_all().unwrap().len(), 8);
    }
}
