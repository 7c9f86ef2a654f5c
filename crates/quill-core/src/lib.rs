//! # Quill Core
//!
//! The posts handler: request routing, list-filter construction and response
//! shaping. Storage is reached only through the ports in [`ports`], so this
//! crate carries no database driver.

pub mod domain;
pub mod error;
pub mod handler;
pub mod ports;

pub use error::{HandlerError, RepoError};
pub use handler::{HandlerConfig, Method, PostHandler, PostRequest};
