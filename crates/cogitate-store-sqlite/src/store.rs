// cogitate-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Thought Store
// Description: Durable ThoughtStore backed by SQLite WAL.
// Purpose: Persist thoughts, branches, and append-only records across
//          process restarts.
// Dependencies: cogitate-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each record is stored as a canonical JSON payload alongside the handful
//! of columns needed to satisfy [`ThoughtStore`]'s search and ordering
//! contracts without a full deserialize per row. Insertion order is the
//! table's natural rowid order; no synthetic sequence counter is kept.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use cogitate_core::Branch;
use cogitate_core::BranchId;
use cogitate_core::BranchState;
use cogitate_core::CrossRef;
use cogitate_core::CrossRefId;
use cogitate_core::Insight;
use cogitate_core::InsightId;
use cogitate_core::Relationship;
use cogitate_core::SearchQuery;
use cogitate_core::StoreError;
use cogitate_core::StoreMetrics;
use cogitate_core::ThoughtStore;
use cogitate_core::Thought;
use cogitate_core::ThoughtId;
use cogitate_core::Timestamp;
use cogitate_core::Validation;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum total path length accepted for a store file.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// Configuration for the `SQLite` thought store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
}

/// Default value for [`SqliteStoreConfig::busy_timeout_ms`].
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored JSON payload could not be decoded.
    #[error("sqlite store corrupt payload: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store configuration.
    #[error("sqlite store invalid config: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        Self::Backend(error.to_string())
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed [`ThoughtStore`] with WAL support.
#[derive(Clone)]
pub struct SqliteThoughtStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteThoughtStore {
    /// Opens a `SQLite`-backed thought store, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(&config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the underlying connection, mapping a poisoned mutex to a [`StoreError`].
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Backend("sqlite connection mutex poisoned".to_string()))
    }
}

/// Creates the store path's parent directory if it does not already exist.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Rejects an empty, overlong, or directory store path.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens the `SQLite` connection and applies the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies foreign-key enforcement, journal mode, and busy timeout pragmas.
fn apply_pragmas(connection: &Connection, config: &SqliteStoreConfig) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Creates the schema on first run, or checks the stored version on reopen.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS thoughts (
                    id TEXT PRIMARY KEY,
                    content_lower TEXT NOT NULL,
                    mode TEXT NOT NULL,
                    payload_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS branches (
                    id TEXT PRIMARY KEY,
                    last_accessed_at INTEGER NOT NULL,
                    payload_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS insights (
                    id TEXT PRIMARY KEY,
                    payload_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS cross_refs (
                    id TEXT PRIMARY KEY,
                    payload_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS validations (
                    id TEXT PRIMARY KEY,
                    payload_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS relationships (
                    id TEXT PRIMARY KEY,
                    payload_json BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS active_branch (
                    singleton INTEGER PRIMARY KEY CHECK (singleton = 1),
                    branch_id TEXT
                );",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Serializes a value to its stored JSON byte representation.
fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|err| StoreError::Backend(err.to_string()))
}

/// Deserializes a value from its stored JSON byte representation.
fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes)
        .map_err(|err| StoreError::Backend(format!("corrupt payload: {err}")))
}

// ============================================================================
// SECTION: ThoughtStore Impl
// ============================================================================

impl ThoughtStore for SqliteThoughtStore {
    fn store_thought(&self, thought: Thought) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let payload = encode(&thought)?;
        let result = connection.execute(
            "INSERT INTO thoughts (id, content_lower, mode, payload_json) VALUES (?1, ?2, ?3, ?4)",
            params![thought.id.as_str(), thought.content_lower, thought.mode.as_str(), payload],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(thought.id.as_str().to_string()))
            }
            Err(err) => Err(StoreError::Backend(err.to_string())),
        }
    }

    fn get_thought(&self, id: &ThoughtId) -> Result<Thought, StoreError> {
        let connection = self.lock()?;
        let payload: Option<Vec<u8>> = connection
            .query_row(
                "SELECT payload_json FROM thoughts WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let Some(payload) = payload else {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        };
        decode(&payload)
    }

    fn search_thoughts(&self, query: &SearchQuery) -> Result<Vec<Thought>, StoreError> {
        let connection = self.lock()?;
        let needle = query.query.to_lowercase();
        let mut statement = connection
            .prepare("SELECT payload_json, mode FROM thoughts WHERE content_lower LIKE ?1 ESCAPE '\\' ORDER BY rowid ASC")
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let like_pattern = format!("%{}%", escape_like(&needle));
        let rows = statement
            .query_map(params![like_pattern], |row| {
                let payload: Vec<u8> = row.get(0)?;
                let mode: String = row.get(1)?;
                Ok((payload, mode))
            })
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        let mut matched = 0usize;
        let mut results = Vec::new();
        for row in rows {
            let (payload, mode) = row.map_err(|err| StoreError::Backend(err.to_string()))?;
            if let Some(filter_mode) = query.mode {
                if mode != filter_mode.as_str() {
                    continue;
                }
            }
            if matched < query.offset {
                matched += 1;
                continue;
            }
            if results.len() >= query.limit {
                break;
            }
            results.push(decode(&payload)?);
            matched += 1;
        }
        Ok(results)
    }

    fn store_branch(&self, branch: Branch) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let payload = encode(&branch)?;
        let result = connection.execute(
            "INSERT INTO branches (id, last_accessed_at, payload_json) VALUES (?1, ?2, ?3)",
            params![branch.id.as_str(), i64::try_from(branch.last_accessed_at.unix_millis()).unwrap_or(i64::MAX), payload],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(branch.id.as_str().to_string()))
            }
            Err(err) => Err(StoreError::Backend(err.to_string())),
        }
    }

    fn get_branch(&self, id: &BranchId) -> Result<Branch, StoreError> {
        let connection = self.lock()?;
        let payload: Option<Vec<u8>> = connection
            .query_row(
                "SELECT payload_json FROM branches WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let Some(payload) = payload else {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        };
        decode(&payload)
    }

    fn list_branches(&self) -> Result<Vec<Branch>, StoreError> {
        let connection = self.lock()?;
        let mut statement = connection
            .prepare("SELECT payload_json FROM branches ORDER BY rowid ASC")
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let rows = statement
            .query_map(params![], |row| row.get::<_, Vec<u8>>(0))
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let mut branches = Vec::new();
        for row in rows {
            let payload = row.map_err(|err| StoreError::Backend(err.to_string()))?;
            branches.push(decode(&payload)?);
        }
        Ok(branches)
    }

    fn get_active_branch(&self) -> Result<Option<Branch>, StoreError> {
        let connection = self.lock()?;
        let branch_id: Option<String> = connection
            .query_row(
                "SELECT branch_id FROM active_branch WHERE singleton = 1",
                params![],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?
            .flatten();
        let Some(branch_id) = branch_id else {
            return Ok(None);
        };
        drop(connection);
        self.get_branch(&BranchId::new(branch_id)).map(Some)
    }

    fn set_active_branch(&self, id: &BranchId) -> Result<(), StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(|err| StoreError::Backend(err.to_string()))?;

        let payload: Option<Vec<u8>> = tx
            .query_row(
                "SELECT payload_json FROM branches WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let Some(payload) = payload else {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        };
        let mut target: Branch = decode(&payload)?;

        let previous_id: Option<String> = tx
            .query_row("SELECT branch_id FROM active_branch WHERE singleton = 1", params![], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?
            .flatten();

        if let Some(previous_id) = previous_id {
            if previous_id != id.as_str() {
                let previous_payload: Option<Vec<u8>> = tx
                    .query_row(
                        "SELECT payload_json FROM branches WHERE id = ?1",
                        params![previous_id],
                        |row| row.get(0),
                    )
                    .optional()
                    .map_err(|err| StoreError::Backend(err.to_string()))?;
                if let Some(previous_payload) = previous_payload {
                    let mut previous: Branch = decode(&previous_payload)?;
                    previous.state = BranchState::Suspended;
                    let encoded = encode(&previous)?;
                    tx.execute(
                        "UPDATE branches SET payload_json = ?1 WHERE id = ?2",
                        params![encoded, previous_id],
                    )
                    .map_err(|err| StoreError::Backend(err.to_string()))?;
                }
            }
        }

        target.state = BranchState::Active;
        let encoded = encode(&target)?;
        tx.execute("UPDATE branches SET payload_json = ?1 WHERE id = ?2", params![encoded, id.as_str()])
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        tx.execute(
            "INSERT INTO active_branch (singleton, branch_id) VALUES (1, ?1)
             ON CONFLICT(singleton) DO UPDATE SET branch_id = excluded.branch_id",
            params![id.as_str()],
        )
        .map_err(|err| StoreError::Backend(err.to_string()))?;

        tx.commit().map_err(|err| StoreError::Backend(err.to_string()))
    }

    fn update_branch_access(&self, id: &BranchId) -> Result<(), StoreError> {
        self.with_branch(id, |branch| {
            branch.last_accessed_at = Timestamp::now();
        })
    }

    fn update_branch_priority(&self, id: &BranchId, priority: f64) -> Result<(), StoreError> {
        self.with_branch(id, |branch| {
            branch.priority = priority;
        })
    }

    fn update_branch_confidence(&self, id: &BranchId, confidence: f64) -> Result<(), StoreError> {
        self.with_branch(id, |branch| {
            branch.confidence = confidence;
        })
    }

    fn append_thought_to_branch(&self, branch_id: &BranchId, thought_id: ThoughtId) -> Result<(), StoreError> {
        let now = Timestamp::now();
        self.with_branch(branch_id, |branch| branch.push_thought(thought_id.clone(), now))
    }

    fn append_insight_to_branch(&self, branch_id: &BranchId, insight_id: InsightId) -> Result<(), StoreError> {
        let now = Timestamp::now();
        self.with_branch(branch_id, |branch| branch.push_insight(insight_id.clone(), now))
    }

    fn append_cross_ref_to_branch(&self, branch_id: &BranchId, cross_ref_id: CrossRefId) -> Result<(), StoreError> {
        let now = Timestamp::now();
        self.with_branch(branch_id, |branch| branch.push_cross_ref(cross_ref_id.clone(), now))
    }

    fn get_recent_branches(&self, limit: usize) -> Result<Vec<Branch>, StoreError> {
        let mut branches = self.list_branches()?;
        branches.sort_by(|a, b| b.last_accessed_at.cmp(&a.last_accessed_at));
        branches.truncate(limit);
        Ok(branches)
    }

    fn store_insight(&self, insight: Insight) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let payload = encode(&insight)?;
        insert_or_already_exists(&connection, "insights", insight.id.as_str(), &payload)
    }

    fn store_validation(&self, validation: Validation) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let payload = encode(&validation)?;
        insert_or_already_exists(&connection, "validations", validation.id.as_str(), &payload)
    }

    fn store_relationship(&self, relationship: Relationship) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let payload = encode(&relationship)?;
        insert_or_already_exists(&connection, "relationships", relationship.id.as_str(), &payload)
    }

    fn get_metrics(&self) -> Result<StoreMetrics, StoreError> {
        let connection = self.lock()?;
        let count = |table: &str| -> Result<usize, StoreError> {
            let value: i64 = connection
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), params![], |row| row.get(0))
                .map_err(|err| StoreError::Backend(err.to_string()))?;
            usize::try_from(value).map_err(|err| StoreError::Backend(err.to_string()))
        };
        let active_branch_id: Option<String> = connection
            .query_row("SELECT branch_id FROM active_branch WHERE singleton = 1", params![], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?
            .flatten();
        Ok(StoreMetrics {
            thought_count: count("thoughts")?,
            branch_count: count("branches")?,
            insight_count: count("insights")?,
            cross_ref_count: count("cross_refs")?,
            validation_count: count("validations")?,
            relationship_count: count("relationships")?,
            active_branch_id: active_branch_id.map(BranchId::new),
        })
    }

    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl SqliteThoughtStore {
    /// Loads a branch, applies `mutate`, and writes the result back in one transaction.
    fn with_branch(
        &self,
        id: &BranchId,
        mutate: impl FnOnce(&mut Branch),
    ) -> Result<(), StoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction().map_err(|err| StoreError::Backend(err.to_string()))?;
        let payload: Option<Vec<u8>> = tx
            .query_row(
                "SELECT payload_json FROM branches WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let Some(payload) = payload else {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        };
        let mut branch: Branch = decode(&payload)?;
        mutate(&mut branch);
        let encoded = encode(&branch)?;
        tx.execute(
            "UPDATE branches SET payload_json = ?1, last_accessed_at = ?2 WHERE id = ?3",
            params![
                encoded,
                i64::try_from(branch.last_accessed_at.unix_millis()).unwrap_or(i64::MAX),
                id.as_str()
            ],
        )
        .map_err(|err| StoreError::Backend(err.to_string()))?;
        tx.commit().map_err(|err| StoreError::Backend(err.to_string()))
    }
}

/// Inserts a row, translating a primary-key conflict into [`StoreError::AlreadyExists`].
fn insert_or_already_exists(
    connection: &Connection,
    table: &str,
    id: &str,
    payload: &[u8],
) -> Result<(), StoreError> {
    let result = connection.execute(
        &format!("INSERT INTO {table} (id, payload_json) VALUES (?1, ?2)"),
        params![id, payload],
    );
    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(StoreError::AlreadyExists(id.to_string()))
        }
        Err(err) => Err(StoreError::Backend(err.to_string())),
    }
}

/// Escapes `%`, `_`, and `\` for use inside a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]
mod tests {
    use super::*;
    use cogitate_core::ThinkingMode;

    fn temp_store() -> (tempfile::TempDir, SqliteThoughtStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cogitate.sqlite3");
        let store = SqliteThoughtStore::new(SqliteStoreConfig {
            path,
            busy_timeout_ms: 1_000,
            journal_mode: SqliteStoreMode::Wal,
        })
        .expect("open store");
        (dir, store)
    }

    fn sample_thought(id: &str, content: &str) -> Thought {
        Thought::new(
            ThoughtId::new(id),
            content,
            ThinkingMode::Linear,
            0.5,
            None,
            None,
            Vec::new(),
            Timestamp::from_millis(0),
        )
        .expect("valid thought")
    }

    #[test]
    fn round_trips_a_thought_through_sqlite() {
        let (_dir, store) = temp_store();
        store.store_thought(sample_thought("t1", "hello durable world")).unwrap();
        let fetched = store.get_thought(&ThoughtId::new("t1")).unwrap();
        assert_eq!(fetched.content, "hello durable world");
    }

    #[test]
    fn duplicate_thought_id_fails_already_exists() {
        let (_dir, store) = temp_store();
        store.store_thought(sample_thought("t1", "a")).unwrap();
        let err = store.store_thought(sample_thought("t1", "b")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn reopening_the_same_file_preserves_data() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cogitate.sqlite3");
        {
            let store = SqliteThoughtStore::new(SqliteStoreConfig {
                path: path.clone(),
                busy_timeout_ms: 1_000,
                journal_mode: SqliteStoreMode::Wal,
            })
            .expect("open store");
            store.store_thought(sample_thought("t1", "persisted")).unwrap();
        }
        let reopened = SqliteThoughtStore::new(SqliteStoreConfig {
            path,
            busy_timeout_ms: 1_000,
            journal_mode: SqliteStoreMode::Wal,
        })
        .expect("reopen store");
        let fetched = reopened.get_thought(&ThoughtId::new("t1")).unwrap();
        assert_eq!(fetched.content, "persisted");
    }

    #[test]
    fn setting_active_branch_demotes_the_previous_one() {
        let (_dir, store) = temp_store();
        store.store_branch(Branch::new(BranchId::new("b1"), 0.0, Timestamp::from_millis(0))).unwrap();
        store.store_branch(Branch::new(BranchId::new("b2"), 0.0, Timestamp::from_millis(0))).unwrap();
        store.set_active_branch(&BranchId::new("b1")).unwrap();
        store.set_active_branch(&BranchId::new("b2")).unwrap();

        let active = store.get_active_branch().unwrap().expect("active branch");
        assert_eq!(active.id.as_str(), "b2");
        let demoted = store.get_branch(&BranchId::new("b1")).unwrap();
        assert_eq!(demoted.state, BranchState::Suspended);
    }

    #[test]
    fn search_escapes_like_metacharacters_in_the_query() {
        let (_dir, store) = temp_store();
        store.store_thought(sample_thought("t1", "100% done_deal")).unwrap();
        let query = SearchQuery {
            query: "100%".to_string(),
            mode: None,
            limit: 10,
            offset: 0,
        };
        let results = store.search_thoughts(&query).unwrap();
        assert_eq!(results.len(), 1);
    }
}
