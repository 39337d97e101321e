//! The dataset store: one SQLite file holding the `pokemon` table.
//!
//! A [`Store`] is an explicit handle returned by [`Store::open`] and
//! threaded through every operation. The only mutation is a full reload
//! from CSV; everything else is a read query.
//!
//! # Example
//!
//! ```no_run
//! use pokedex_sqlite::Store;
//!
//! let mut store = Store::open("pokedex.db")?;
//! if !store.exists()? {
//!     store.load("pokemon.csv")?;
//! }
//! let bulbasaur = store.get_by_name("bulbasaur")?;
//! println!("{} is {} / {}", bulbasaur.name, bulbasaur.type_1, bulbasaur.type_2);
//! store.close()?;
//! # Ok::<(), pokedex_sqlite::StoreError>(())
//! ```

use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::LoadOptions;
use crate::error::{Result, StoreError};
use crate::parser::Record;
use crate::schema::POKEMON;
use crate::ui::{SilentUi, Ui};
use crate::writer::import_csv;

const RECORD_SELECT_SQL: &str = "SELECT
    name,
    species_id,
    height,
    weight,
    type_1,
    type_2,
    url_image,
    generation_id,
    evolves_from_species_id
FROM pokemon";

/// Open handle on a dataset database.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens or creates the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the file cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // Optimize for bulk insert
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "opened store");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        debug!("opened in-memory store");
        Ok(Self { conn, path: None })
    }

    /// Flushes the write-ahead log into the database file and closes it.
    ///
    /// Consumes the handle, so a store can only be closed once. Loads are
    /// already committed when they return; after `close` they are also in
    /// the main database file.
    pub fn close(self) -> Result<()> {
        if self.path.is_some() {
            self.conn
                .query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        }
        self.conn.close().map_err(|(_, err)| StoreError::Storage(err))?;
        debug!("closed store");
        Ok(())
    }

    /// Returns true if the table exists and holds at least one row.
    ///
    /// A missing table is reported as `false`, never as an error.
    pub fn exists(&self) -> Result<bool> {
        if !self.table_exists()? {
            return Ok(false);
        }
        let has_rows = self.conn.query_row(
            &format!("SELECT EXISTS (SELECT 1 FROM {})", POKEMON.name),
            [],
            |row| row.get(0),
        )?;
        Ok(has_rows)
    }

    /// Replaces the table with the contents of `csv_path` using default
    /// options and no progress output. Returns the number of rows loaded.
    pub fn load(&mut self, csv_path: impl AsRef<Path>) -> Result<u64> {
        self.load_with(csv_path, &LoadOptions::default(), &mut SilentUi::new())
    }

    /// Replaces the table with the contents of `csv_path`.
    ///
    /// All string fields are lower-cased before insertion, so lookups must
    /// use lower-case keys. On error nothing is committed and the previous
    /// table is left as it was; callers should treat the load as failed and
    /// run it again.
    pub fn load_with(
        &mut self,
        csv_path: impl AsRef<Path>,
        options: &LoadOptions,
        ui: &mut impl Ui,
    ) -> Result<u64> {
        let csv_path = csv_path.as_ref();
        let count = import_csv(&mut self.conn, csv_path, options, ui)?;
        info!(rows = count, csv = %csv_path.display(), "loaded dataset");
        Ok(count)
    }

    /// Number of rows in the table.
    pub fn count(&self) -> Result<u64> {
        self.require_table()?;
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", POKEMON.name),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// All names in ascending order, duplicates kept.
    pub fn list_names(&self) -> Result<Vec<String>> {
        self.query_column("SELECT name FROM pokemon ORDER BY name", [])
    }

    /// All species ids in ascending order, duplicates kept.
    pub fn list_species_ids(&self) -> Result<Vec<i64>> {
        self.query_column("SELECT species_id FROM pokemon ORDER BY species_id", [])
    }

    /// Looks up a record by its stored (lower-case) name.
    ///
    /// When several rows share the name one of them is returned; use
    /// [`Store::find_by_name`] to see all of them.
    pub fn get_by_name(&self, name: &str) -> Result<Record> {
        self.query_one("name", name, params![name])
    }

    /// Looks up a record by species id. Same contract as [`Store::get_by_name`].
    pub fn get_by_id(&self, species_id: i64) -> Result<Record> {
        self.query_one("species_id", &species_id.to_string(), params![species_id])
    }

    /// Every record with the given name, in load order.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Record>> {
        self.query_records("name", params![name])
    }

    /// Every record with the given species id, in load order.
    pub fn find_by_id(&self, species_id: i64) -> Result<Vec<Record>> {
        self.query_records("species_id", params![species_id])
    }

    /// Distinct values of type_1 and type_2 combined, ascending.
    ///
    /// Nothing is filtered out: an empty secondary type shows up as `""`.
    pub fn list_types(&self) -> Result<Vec<String>> {
        self.query_column(
            "SELECT type_1 FROM pokemon UNION SELECT type_2 FROM pokemon ORDER BY 1",
            [],
        )
    }

    /// Distinct names of records whose primary or secondary type is `kind`.
    pub fn list_by_type(&self, kind: &str) -> Result<Vec<String>> {
        self.query_column(
            "SELECT DISTINCT name FROM pokemon WHERE type_1 = ?1 OR type_2 = ?1 ORDER BY name",
            params![kind],
        )
    }

    fn table_exists(&self) -> Result<bool> {
        let found = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![POKEMON.name],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    fn require_table(&self) -> Result<()> {
        if self.table_exists()? {
            Ok(())
        } else {
            Err(StoreError::MissingTable(POKEMON.name))
        }
    }

    fn query_column<T, P>(&self, sql: &str, params: P) -> Result<Vec<T>>
    where
        T: rusqlite::types::FromSql,
        P: rusqlite::Params,
    {
        self.require_table()?;
        let mut stmt = self.conn.prepare(sql)?;
        let values = stmt
            .query_map(params, |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(values)
    }

    fn query_records(&self, key: &'static str, params: &[&dyn ToSql]) -> Result<Vec<Record>> {
        self.require_table()?;
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE {key} = ?1 ORDER BY rowid"))?;
        let records = stmt
            .query_map(params, Record::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn query_one(&self, key: &'static str, value: &str, params: &[&dyn ToSql]) -> Result<Record> {
        self.require_table()?;
        self.conn
            .query_row(
                &format!("{RECORD_SELECT_SQL} WHERE {key} = ?1 ORDER BY rowid LIMIT 1"),
                params,
                Record::from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound {
                key,
                value: value.to_string(),
            })
    }
}
