// Settings persistence using SQLite

use crate::columns::ColumnStore;
use crate::types::SavedColumn;
use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, Result as SqlResult};
use std::path::{Path, PathBuf};
use tracing::warn;

const KEY_SAVED_COLUMNS: &str = "savedColumns";
const KEY_THEME: &str = "theme";

pub struct Settings {
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Key-value store backed by a single SQLite table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    // Store in the platform data directory; disabled if the directory is unknown
    pub fn default_location() -> Self {
        dirs::data_local_dir()
            .map(|p| Self::at(p.join("width-percent").join("settings.db")))
            .unwrap_or(Self { db_path: None })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
        }
    }

    fn open(&self) -> anyhow::Result<Connection> {
        let db_path = self
            .db_path
            .as_deref()
            .context("No data directory available")?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create: {}", parent.display()))?;
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open: {}", db_path.display()))?;
        init_db(&conn)?;
        Ok(conn)
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let conn = self.open()?;
        Ok(get_setting(&conn, key)?)
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let conn = self.open()?;
        set_setting(&conn, key, value)?;
        Ok(())
    }
}

impl ColumnStore for SqliteStore {
    // Missing or corrupt data loads as an empty set
    fn load(&self) -> Vec<SavedColumn> {
        let raw = match self.get(KEY_SAVED_COLUMNS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read saved columns");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "discarding corrupt saved columns");
            Vec::new()
        })
    }

    fn save(&self, columns: &[SavedColumn]) -> anyhow::Result<()> {
        let json = serde_json::to_string(columns).context("Failed to serialize columns")?;
        self.set(KEY_SAVED_COLUMNS, &json)
    }
}

// Initializes database and creates tables if needed
fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

// Loads settings, falling back to defaults on any failure
pub fn load_settings(store: &SqliteStore) -> Settings {
    let mut settings = Settings::default();
    match store.get(KEY_THEME) {
        Ok(Some(val)) => settings.dark_mode = val == "dark",
        Ok(None) => {}
        Err(e) => warn!(error = %e, "failed to read settings"),
    }
    settings
}

// Saves settings (call from async context)
pub fn save_settings(store: &SqliteStore, settings: &Settings) {
    let theme = if settings.dark_mode { "dark" } else { "light" };
    if let Err(e) = store.set(KEY_THEME, theme) {
        warn!(error = %e, "failed to save settings");
    }
}

fn get_setting(conn: &Connection, key: &str) -> SqlResult<Option<String>> {
    conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
        row.get(0)
    })
    .optional()
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> SqlResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}
