//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database adapters, the in-memory fallback
//! backend, and the auth service implementations.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL support via SeaORM
//!
//! Without `postgres` the server runs entirely on the in-memory backend,
//! which is also what the test suites exercise.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConnections;
pub use memory::InMemoryStore;
