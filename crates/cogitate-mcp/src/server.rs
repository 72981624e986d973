// cogitate-mcp/src/server.rs
// ============================================================================
// Module: Cogitate Server
// Description: Composition root — builds the store, calibration tracker, and
//              orchestrator, wires them into a ToolRouter, and registers the
//              predefined workflows.
// Purpose: One entry point a binary (cogitate-cli) constructs and then hands
//          to crate::transport::run_stdio.
// Dependencies: cogitate-core, cogitate-calibration, cogitate-orchestrator,
//               cogitate-store-sqlite
// ============================================================================

//! ## Overview
//! [`CogitateServer`] mirrors the teacher's `McpServer`: a thin struct that
//! owns a [`ToolRouter`] plus an audit sink, built once from a
//! [`ServerConfig`]. Construction is also where this crate resolves the
//! "hot-potato" cycle spec.md calls out: the [`Orchestrator`] is built first
//! with no executor, the [`ToolRouter`] is built around it, and the router is
//! then registered back onto the orchestrator as its [`ToolExecutor`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use cogitate_calibration::CalibrationTracker;
use cogitate_core::InMemoryThoughtStore;
use cogitate_core::SharedThoughtStore;
use cogitate_orchestrator::Orchestrator;
use cogitate_store_sqlite::SqliteStoreConfig;
use cogitate_store_sqlite::SqliteStoreError;
use cogitate_store_sqlite::SqliteThoughtStore;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::registration;
use crate::tools::ToolDefinition;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Which backend a server's [`ThoughtStore`](cogitate_core::ThoughtStore)
/// should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// An in-process, non-persistent store.
    Memory,
    /// A `SQLite`-backed store at the given path.
    Sqlite(PathBuf),
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Memory
    }
}

/// Construction-time configuration for a [`CogitateServer`].
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Which store backend to open.
    pub store_backend: StoreBackend,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing a [`CogitateServer`].
#[derive(Debug, Error)]
pub enum ServerError {
    /// The `SQLite` backend could not be opened.
    #[error("failed to open sqlite store: {0}")]
    Store(#[from] SqliteStoreError),
    /// A predefined workflow failed to register; this indicates a defect in
    /// this crate, not a runtime condition.
    #[error("failed to register a predefined workflow: {0}")]
    Registration(#[from] cogitate_orchestrator::OrchestratorError),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// The cognitive-reasoning server: owns every backend and exposes the tool
/// catalog through [`Self::router`].
pub struct CogitateServer {
    config: ServerConfig,
    router: Arc<ToolRouter>,
    audit: Arc<dyn AuditSink>,
}

impl CogitateServer {
    /// Builds a server from `config`, logging to [`NoopAuditSink`].
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the configured store backend cannot be
    /// opened, or a predefined workflow fails to register.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        Self::with_audit_sink(config, Arc::new(NoopAuditSink))
    }

    /// Builds a server from `config` with a caller-supplied audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the configured store backend cannot be
    /// opened, or a predefined workflow fails to register.
    pub fn with_audit_sink(config: ServerConfig, audit: Arc<dyn AuditSink>) -> Result<Self, ServerError> {
        let store = open_store(&config.store_backend)?;
        let calibration = Arc::new(CalibrationTracker::new());
        let orchestrator = Arc::new(Orchestrator::new(None));

        let router = Arc::new(ToolRouter::new(store, calibration, orchestrator.clone()));
        orchestrator.set_tool_executor(router.clone())?;
        registration::register_predefined_workflows(&orchestrator)?;

        Ok(Self { config, router, audit })
    }

    /// Returns the tool catalog this server exposes.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.router.list_tools()
    }

    /// Returns the router backing this server, for direct dispatch.
    #[must_use]
    pub fn router(&self) -> &Arc<ToolRouter> {
        &self.router
    }

    /// Returns the audit sink backing this server.
    #[must_use]
    pub fn audit(&self) -> &Arc<dyn AuditSink> {
        &self.audit
    }

    /// Returns the configuration this server was built from.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

fn open_store(backend: &StoreBackend) -> Result<SharedThoughtStore, ServerError> {
    match backend {
        StoreBackend::Memory => Ok(SharedThoughtStore::from_store(InMemoryThoughtStore::new())),
        StoreBackend::Sqlite(path) => {
            let config = SqliteStoreConfig {
                path: path.clone(),
                busy_timeout_ms: 5_000,
                journal_mode: cogitate_store_sqlite::SqliteStoreMode::Wal,
            };
            let store = SqliteThoughtStore::new(config)?;
            Ok(SharedThoughtStore::from_store(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CogitateServer;
    use super::ServerConfig;
    use super::StoreBackend;

    #[test]
    fn a_memory_backed_server_builds_with_every_predefined_workflow() {
        let server = CogitateServer::new(ServerConfig { store_backend: StoreBackend::Memory }).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 18);
    }

    #[test]
    fn a_sqlite_backed_server_builds_against_a_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cogitate.sqlite3");
        let server = CogitateServer::new(ServerConfig { store_backend: StoreBackend::Sqlite(path) }).unwrap();
        assert_eq!(server.list_tools().len(), 18);
    }
}
