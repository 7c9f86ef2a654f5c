//! # Quill Shared
//!
//! Wire types shared between the handler core and whatever hosts it.
//! The invocation event and response descriptor mirror the serverless
//! request/response envelope the posts function is deployed behind.

pub mod dto;
pub mod event;
pub mod response;

pub use dto::{DeletedBody, ErrorBody, PostInput};
pub use event::InvocationEvent;
pub use response::HandlerResponse;
