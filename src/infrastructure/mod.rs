//! Infrastructure layer for external integrations.
//!
//! Implements the storage contracts defined by the domain layer.
//!
//! - [`persistence`] - SQLite repository implementation

pub mod persistence;
