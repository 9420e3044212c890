//! SQLite store handle: location fallback, lazy connection, schema.

use crate::domain::{ItRequest, NewItRequest};
use crate::error::{AppError, Unavailable};
use rusqlite::{params, Connection, Row};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Development fallback when no location is configured.
pub const DEFAULT_DB_FILE: &str = "./local.db";

const SCHEMA_SQL: &str = include_str!("../../migrations/0001_it_requests.sql");

const SELECT_COLUMNS: &str = "id, requisition_code, date_of_request, type_of_system, quantity, model, \
     proposed_configuration, requested_by, purpose_of_request, username_designation, \
     email_id_request, date_of_joining, created_at, updated_at";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
    /// A configured URL this build cannot open; every use reports unavailable.
    Unsupported(String),
}

impl StoreLocation {
    /// Explicit URL, else in-memory in production, else the local file.
    pub fn resolve(database_url: Option<&str>, production: bool) -> Self {
        match database_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => Self::parse(url),
            None if production => Self::Memory,
            None => Self::File(PathBuf::from(DEFAULT_DB_FILE)),
        }
    }

    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        if matches!(url, ":memory:" | "file::memory:" | "sqlite::memory:") {
            return Self::Memory;
        }
        if let Some(path) = url.strip_prefix("sqlite://") {
            return Self::File(PathBuf::from(path));
        }
        if url.contains("://") {
            return Self::Unsupported(url.to_string());
        }
        if let Some(path) = url.strip_prefix("file:") {
            let path = path.split('?').next().unwrap_or(path);
            return Self::File(PathBuf::from(path));
        }
        Self::File(PathBuf::from(url))
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Memory => f.write_str(":memory:"),
            Self::Unsupported(url) => write!(f, "unsupported({})", url),
        }
    }
}

/// One lazily opened connection shared by every caller.
///
/// The slot is filled under the mutex, so concurrent first callers wait for
/// the same connection instead of opening their own. A failed open leaves the
/// slot empty and the next call tries again. A panic inside an operation
/// poisons the mutex but leaves the connection in place, so later calls
/// recover the guard and keep using it.
pub struct StoreHandle {
    location: StoreLocation,
    conn: Mutex<Option<Connection>>,
}

impl StoreHandle {
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: Mutex::new(None),
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// True once a connection exists; does not connect.
    pub fn is_connected(&self) -> bool {
        self.slot().is_some()
    }

    /// Connect if needed and report whether the store can be used.
    pub fn is_available(&self) -> bool {
        self.with_connection(|_| Ok(())).is_ok()
    }

    /// Create the table if absent. Safe to call any number of times.
    pub fn ensure_schema(&self) -> Result<(), AppError> {
        self.with_connection(create_schema)
    }

    /// Insert one row and return the id SQLite assigned.
    pub fn insert(&self, req: &NewItRequest) -> Result<i64, AppError> {
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO it_requests (requisition_code, date_of_request, type_of_system, quantity, model, \
                 proposed_configuration, requested_by, purpose_of_request, username_designation, \
                 email_id_request, date_of_joining, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    req.requisition_code,
                    req.date_of_request,
                    req.type_of_system,
                    req.quantity,
                    req.model,
                    req.proposed_configuration,
                    req.requested_by,
                    req.purpose_of_request,
                    req.username_designation,
                    req.email_id_request,
                    req.date_of_joining,
                    req.created_at,
                    req.updated_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All rows in id order.
    pub fn select_all(&self) -> Result<Vec<ItRequest>, AppError> {
        self.with_connection(|conn| {
            let sql = format!("SELECT {} FROM it_requests ORDER BY id", SELECT_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map_row)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }

    pub fn count(&self) -> Result<i64, AppError> {
        self.with_connection(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM it_requests", [], |r| r.get(0))?)
        })
    }

    fn with_connection<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>,
    {
        let mut guard = self.slot();
        if guard.is_none() {
            *guard = Some(open_connection(&self.location)?);
        }
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(AppError::Unexpected("store connection missing".into())),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("location", &self.location)
            .field("connected", &self.is_connected())
            .finish()
    }
}

fn open_connection(location: &StoreLocation) -> Result<Connection, AppError> {
    let conn = match location {
        StoreLocation::Memory => Connection::open_in_memory(),
        StoreLocation::File(path) => {
            ensure_parent_dir(path)?;
            Connection::open(path)
        }
        StoreLocation::Unsupported(url) => {
            log::error!("Database location not supported: {}", url);
            return Err(Unavailable::Unsupported(url.clone()).into());
        }
    }
    .map_err(|e| {
        log::error!("Database connection failed ({}): {}", location, e);
        Unavailable::Connect(e.to_string())
    })?;

    create_schema(&conn).map_err(|e| {
        log::error!("Database schema creation failed ({}): {}", location, e);
        match e {
            AppError::StoreUnavailable(u) => AppError::StoreUnavailable(u),
            other => Unavailable::Connect(other.to_string()).into(),
        }
    })?;
    log::info!("Database connected: {}", location);
    Ok(conn)
}

fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            log::error!("Database directory {:?} unusable: {}", parent, e);
            Unavailable::Connect(format!("{}: {}", parent.display(), e))
        })?;
    }
    Ok(())
}

fn create_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<ItRequest> {
    Ok(ItRequest {
        id: row.get(0)?,
        requisition_code: row.get(1)?,
        date_of_request: row.get(2)?,
        type_of_system: row.get(3)?,
        quantity: row.get(4)?,
        model: row.get(5)?,
        proposed_configuration: row.get(6)?,
        requested_by: row.get(7)?,
        purpose_of_request: row.get(8)?,
        username_designation: row.get(9)?,
        email_id_request: row.get(10)?,
        date_of_joining: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

/// In-memory store with the schema applied, for tests.
pub fn init_test_db() -> StoreHandle {
    let store = StoreHandle::new(StoreLocation::Memory);
    if let Err(e) = store.ensure_schema() {
        panic!("in-memory store failed: {}", e);
    }
    store
}
