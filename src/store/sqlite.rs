//! SQLite-backed student store
//!
//! One connection guarded by a mutex. Reads run directly on the connection,
//! writes run inside an IMMEDIATE transaction so a conflict check and the
//! write it guards see the same snapshot.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::errors::{StoreError, StoreResult};
use super::StudentRepository;
use crate::students::{Student, StudentFields, StudentKey};

/// Path value selecting a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS students (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id  TEXT NOT NULL UNIQUE,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL UNIQUE,
        phone       TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS students_created_at ON students (created_at, id);
";

const COLUMNS: &str = "id, student_id, name, email, phone, created_at";

/// Student table in a SQLite database.
pub struct SqliteStudentStore {
    connection: Mutex<Connection>,
}

impl SqliteStudentStore {
    /// Open (or create) the database at `path` and ensure the table exists.
    ///
    /// The path `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.as_os_str() == IN_MEMORY_PATH {
            return Self::open_in_memory();
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection = Connection::open(path)?;
        connection.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::from_connection(connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> StoreResult<Self> {
        connection.busy_timeout(BUSY_TIMEOUT)?;
        connection.execute_batch(SCHEMA)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Run read-only queries against the table.
    pub fn read<T, E>(&self, f: impl FnOnce(&StudentTable<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let connection = self.connection.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&StudentTable::new(&connection))
    }

    /// Run queries and writes inside one transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`; any error rolls
    /// every statement back.
    pub fn write<T, E>(&self, f: impl FnOnce(&StudentTable<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut connection = self.connection.lock().map_err(|_| StoreError::LockPoisoned)?;
        let tx = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        let output = f(&StudentTable::new(&tx))?;
        tx.commit().map_err(StoreError::from)?;
        Ok(output)
    }
}

/// Repository view over one connection or transaction.
pub struct StudentTable<'c> {
    conn: &'c Connection,
}

impl<'c> StudentTable<'c> {
    fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for StudentTable<'_> {
    fn list_all(&self) -> StoreResult<Vec<Student>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {COLUMNS} FROM students ORDER BY created_at ASC, id ASC"
        ))?;
        let rows = stmt.query_map([], row_to_student)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn find_by_id(&self, id: StudentKey) -> StoreResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {COLUMNS} FROM students WHERE id = ?1"))?;
        Ok(stmt.query_row(params![id], row_to_student).optional()?)
    }

    fn find_by_natural_keys(
        &self,
        student_id: &str,
        email: &str,
        exclude: Option<StudentKey>,
    ) -> StoreResult<Vec<Student>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {COLUMNS} FROM students
             WHERE (student_id = ?1 OR email = ?2) AND (?3 IS NULL OR id <> ?3)
             ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map(params![student_id, email, exclude], row_to_student)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn insert(&self, fields: &StudentFields, created_at: DateTime<Utc>) -> StoreResult<Student> {
        self.conn.execute(
            "INSERT INTO students (student_id, name, email, phone, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![fields.student_id, fields.name, fields.email, fields.phone, created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        self.find_by_id(id)?
            .ok_or(StoreError::Database(rusqlite::Error::QueryReturnedNoRows))
    }

    fn update(&self, id: StudentKey, fields: &StudentFields) -> StoreResult<Option<Student>> {
        let changed = self.conn.execute(
            "UPDATE students SET student_id = ?1, name = ?2, email = ?3, phone = ?4
             WHERE id = ?5",
            params![fields.student_id, fields.name, fields.email, fields.phone, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.find_by_id(id)
    }

    fn delete(&self, id: StudentKey) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        student_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        created_at: row.get(5)?,
    })
}
