use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::database::schema::SCHEMA;
use crate::error::{FortuneError, Result};

/// Prefix applied to offensive category names when listing. Presentation
/// convention only; never stored in the schema.
pub const OFFENSIVE_PREFIX: &str = "off/";

/// A handle to an open fortune dataset.
///
/// Owns the underlying SQLite connection: the connection is released when
/// the handle is dropped or explicitly closed, on every exit path. Because
/// `close` consumes the handle, double-close and query-after-close cannot
/// be expressed.
pub struct FortuneDb {
    conn: Connection,
}

impl FortuneDb {
    /// Opens the dataset at `path`, creating the schema if it is absent.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Opens an ephemeral in-memory dataset. Used by tests and for dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Closes the handle, surfacing any error SQLite reports on shutdown.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| FortuneError::from(e))
    }

    /// Inserts a category row and returns its assigned id.
    pub fn insert_category(&self, name: &str, offensive: bool) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (name, offensive) VALUES (?1, ?2)",
            params![name, offensive],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts one fortune under an existing category.
    pub fn insert_fortune(&self, category: i64, data: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO fortunes (category, data) VALUES (?1, ?2)",
            params![category, data],
        )?;
        Ok(())
    }

    /// Lists every category name, offensive ones prefixed with `off/`.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, offensive FROM categories")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (name, offensive) = row?;
            if offensive {
                out.push(format!("{OFFENSIVE_PREFIX}{name}"));
            } else {
                out.push(name);
            }
        }
        Ok(out)
    }

    /// Lists offensive category names, each prefixed with `off/`.
    pub fn list_offensive_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories WHERE offensive = 1")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for name in rows {
            out.push(format!("{OFFENSIVE_PREFIX}{}", name?));
        }
        Ok(out)
    }

    /// Lists non-offensive category names, unprefixed.
    pub fn list_appropriate_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories WHERE offensive = 0")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for name in rows {
            out.push(name?);
        }
        Ok(out)
    }

    /// Picks a category id uniformly at random among all categories.
    pub fn random_category(&self) -> Result<i64> {
        self.random_category_id("SELECT id FROM categories ORDER BY RANDOM() LIMIT 1")
    }

    /// Picks a category id uniformly at random among offensive categories.
    pub fn random_offensive_category(&self) -> Result<i64> {
        self.random_category_id(
            "SELECT id FROM categories WHERE offensive = 1 ORDER BY RANDOM() LIMIT 1",
        )
    }

    /// Picks a category id uniformly at random among non-offensive categories.
    pub fn random_appropriate_category(&self) -> Result<i64> {
        self.random_category_id(
            "SELECT id FROM categories WHERE offensive = 0 ORDER BY RANDOM() LIMIT 1",
        )
    }

    /// Picks a random fortune from the given category.
    pub fn random_fortune_from(&self, category: i64) -> Result<String> {
        self.conn
            .query_row(
                "SELECT data FROM fortunes WHERE category = ?1 ORDER BY RANDOM() LIMIT 1",
                params![category],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(FortuneError::NoFortune)
    }

    /// Picks a random fortune, uniform over all fortunes regardless of category.
    pub fn random_fortune(&self) -> Result<String> {
        self.random_fortune_text("SELECT data FROM fortunes ORDER BY RANDOM() LIMIT 1")
    }

    /// Picks a random fortune whose category is marked offensive.
    pub fn random_offensive_fortune(&self) -> Result<String> {
        self.random_fortune_text(
            "SELECT data FROM fortunes INNER JOIN categories \
             ON fortunes.category = categories.id \
             WHERE offensive = 1 ORDER BY RANDOM() LIMIT 1",
        )
    }

    /// Picks a random fortune whose category is not marked offensive.
    pub fn random_appropriate_fortune(&self) -> Result<String> {
        self.random_fortune_text(
            "SELECT data FROM fortunes INNER JOIN categories \
             ON fortunes.category = categories.id \
             WHERE offensive = 0 ORDER BY RANDOM() LIMIT 1",
        )
    }

    // Selection is re-evaluated fresh on every call; SQLite's RANDOM() gives
    // a uniform order over the matching rows, so LIMIT 1 is a uniform draw.
    fn random_category_id(&self, sql: &str) -> Result<i64> {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .optional()?
            .ok_or(FortuneError::NoCategory)
    }

    fn random_fortune_text(&self, sql: &str) -> Result<String> {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .optional()?
            .ok_or(FortuneError::NoFortune)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seeded_db() -> FortuneDb {
        let db = FortuneDb::open_in_memory().unwrap();
        let quotes = db.insert_category("quotes", false).unwrap();
        let rude = db.insert_category("rude", true).unwrap();
        db.insert_fortune(quotes, "A watched pot never boils.").unwrap();
        db.insert_fortune(quotes, "Look before you leap.").unwrap();
        db.insert_fortune(rude, "Go away.").unwrap();
        db
    }

    #[test]
    fn listing_prefixes_offensive_names() {
        let db = seeded_db();

        let mut all = db.list_categories().unwrap();
        all.sort();
        assert_eq!(all, vec!["off/rude", "quotes"]);

        assert_eq!(db.list_offensive_categories().unwrap(), vec!["off/rude"]);
        assert_eq!(db.list_appropriate_categories().unwrap(), vec!["quotes"]);
    }

    #[test]
    fn listings_partition_the_category_set() {
        let db = seeded_db();

        let offensive = db.list_offensive_categories().unwrap();
        let appropriate = db.list_appropriate_categories().unwrap();
        for name in &offensive {
            assert!(name.starts_with(OFFENSIVE_PREFIX));
            assert!(!appropriate.contains(name));
        }

        // Union of both listings equals the full listing.
        let mut union: Vec<String> = offensive.into_iter().chain(appropriate).collect();
        union.sort();
        let mut all = db.list_categories().unwrap();
        all.sort();
        assert_eq!(union, all);
    }

    #[test]
    fn listings_are_empty_on_an_empty_dataset() {
        let db = FortuneDb::open_in_memory().unwrap();
        assert!(db.list_categories().unwrap().is_empty());
        assert!(db.list_offensive_categories().unwrap().is_empty());
        assert!(db.list_appropriate_categories().unwrap().is_empty());
    }

    #[test]
    fn random_selection_over_empty_sets_is_an_explicit_error() {
        let db = FortuneDb::open_in_memory().unwrap();
        assert!(matches!(db.random_category(), Err(FortuneError::NoCategory)));
        assert!(matches!(
            db.random_offensive_category(),
            Err(FortuneError::NoCategory)
        ));
        assert!(matches!(db.random_fortune(), Err(FortuneError::NoFortune)));

        // A category that exists but holds no fortunes is still a NoFortune,
        // not an empty string.
        let empty = db.insert_category("empty", false).unwrap();
        assert!(matches!(
            db.random_fortune_from(empty),
            Err(FortuneError::NoFortune)
        ));
        assert!(matches!(
            db.random_offensive_fortune(),
            Err(FortuneError::NoFortune)
        ));
    }

    #[test]
    fn repeated_draws_cover_every_eligible_fortune() {
        let db = seeded_db();

        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(db.random_fortune().unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn filtered_draws_never_leak_across_the_offensive_boundary() {
        let db = seeded_db();

        for _ in 0..100 {
            assert_eq!(db.random_offensive_fortune().unwrap(), "Go away.");
            assert_ne!(db.random_appropriate_fortune().unwrap(), "Go away.");
        }

        let rude = db.random_offensive_category().unwrap();
        for _ in 0..100 {
            assert_ne!(db.random_appropriate_category().unwrap(), rude);
        }
    }

    #[test]
    fn close_consumes_the_handle() {
        let db = seeded_db();
        db.close().unwrap();
    }
}
