use async_trait::async_trait;

use crate::domain::{ListFilter, NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Opens one storage session per handler invocation.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Connect using the given connection string.
    async fn open(&self, database_url: &str) -> Result<Box<dyn PostRepository>, RepoError>;
}

/// Post operations over a single open connection.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// All posts matching the filter, newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Post>, RepoError>;

    /// Insert a post and return it with server-assigned columns populated.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite every mutable column and refresh `updated_at`.
    /// Returns `None` when no post has this id.
    async fn replace(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// Hard delete. Returns the deleted id, or `None` when nothing matched.
    async fn delete(&self, id: PostId) -> Result<Option<PostId>, RepoError>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> Result<(), RepoError>;
}
