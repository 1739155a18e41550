//! # Quill Shared
//!
//! Wire types for the blog API: request bodies, response bodies and
//! problem details.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
