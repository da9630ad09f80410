//! # Quill Core
//!
//! The domain layer of the Quill blog platform.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod visibility;

pub use error::DomainError;
pub use visibility::Viewer;
