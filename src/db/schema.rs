//! SQL-schema för Heritage Health
//!
//! Endast föräldrareferensen lagras; barnlistor härleds via idx_members_parent.

pub const SCHEMA_VERSION: i32 = 2;

pub const CREATE_TABLES: &str = r#"
-- Familjemedlemmar
CREATE TABLE IF NOT EXISTS family_members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL DEFAULT 0,
    birth_date TEXT NOT NULL,
    deceased INTEGER NOT NULL DEFAULT 0,
    last_checkup TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    health_conditions TEXT NOT NULL DEFAULT '[]',
    medications TEXT NOT NULL DEFAULT '[]',
    allergies TEXT NOT NULL DEFAULT '[]',
    health_status TEXT NOT NULL DEFAULT 'healthy',
    generation INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 0,
    parent_id INTEGER,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    FOREIGN KEY (parent_id) REFERENCES family_members(id) ON DELETE SET NULL,
    CHECK (length(trim(name)) > 0),
    CHECK (parent_id IS NULL OR parent_id != id)
);

CREATE INDEX IF NOT EXISTS idx_members_parent ON family_members(parent_id);
CREATE INDEX IF NOT EXISTS idx_members_name ON family_members(name);

-- Kulturella hälsotraditioner (referensdata)
CREATE TABLE IF NOT EXISTS cultural_practices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    region TEXT NOT NULL,
    category TEXT NOT NULL,
    health_benefits TEXT NOT NULL,
    health_considerations TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_practices_category ON cultural_practices(category);

-- Migrationshistorik
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Gemensam kolumnlista för familjemedlemmar (ordningen används av row_to_member)
pub const MEMBER_COLUMNS: &str = "id, name, age, birth_date, deceased, last_checkup, notes,
     health_conditions, medications, allergies, health_status,
     generation, level, parent_id, created_at, updated_at";
