// cogitate-config/src/lib.rs
// ============================================================================
// Module: Cogitate Config Library
// Description: Environment-variable configuration model and loader.
// Purpose: Single source of truth for how cogitate-cli and cogitate-mcp are
//          configured at process startup.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! `cogitate-config` reads a small, fixed set of `COGITATE_*` environment
//! variables into a [`Config`] value. There is no config-file layer: unlike
//! the teacher's `decision-gate-config`, which validates a
//! `decision-gate.toml` against auth, rate-limit, and policy schemas, this
//! server has no multi-tenant or auth surface to configure, so loading is
//! scoped to the handful of variables the server actually reads.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::Config;
pub use config::ConfigError;
pub use config::StoreBackendKind;
