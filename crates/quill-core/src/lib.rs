//! # Quill Core
//!
//! The domain layer of the Quill blog service.
//! This crate contains the blog post model, its write-time validation and the
//! repository port, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
