//! Domain entities - the core business objects.

mod filter;
mod post;
mod timestamp;

pub use filter::{ListFilter, Operator, PostColumn, Predicate, PredicateValue};
pub use post::{NewPost, Post, PostChanges, PostId};
