//! The posts handler: method routing over a per-invocation connection.

mod request;

use std::sync::Arc;

use quill_shared::{DeletedBody, HandlerResponse, PostInput};

use crate::domain::{ListFilter, NewPost, PostChanges, PostId};
use crate::error::HandlerError;
use crate::ports::{PostRepository, PostStore};

pub use request::{Method, PostRequest};

/// Handler configuration, injected at construction.
#[derive(Debug, Clone, Default)]
pub struct HandlerConfig {
    /// Connection string. Without it every non-preflight request gets a 500.
    pub database_url: Option<String>,
}

impl HandlerConfig {
    pub fn new(database_url: Option<String>) -> Self {
        Self { database_url }
    }
}

/// Stateless CRUD handler for posts.
#[derive(Clone)]
pub struct PostHandler {
    store: Arc<dyn PostStore>,
    config: HandlerConfig,
}

impl PostHandler {
    pub fn new(store: Arc<dyn PostStore>, config: HandlerConfig) -> Self {
        Self { store, config }
    }

    /// Handle one invocation.
    ///
    /// Business outcomes (404, 400, 405, unconfigured database) come back as
    /// `Ok` responses. Storage and body-parsing failures come back as `Err`
    /// after the connection has been released.
    pub async fn handle(&self, request: PostRequest) -> Result<HandlerResponse, HandlerError> {
        if request.method == Method::Options {
            return Ok(HandlerResponse::preflight());
        }

        let Some(database_url) = self.config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; refusing {} request", request.method);
            return Ok(HandlerResponse::database_not_configured());
        };

        let repo = match self.store.open(database_url).await {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!(error = %e, "Could not open database connection");
                return Err(e.into());
            }
        };
        let outcome = dispatch(repo.as_ref(), &request).await;

        if let Err(e) = repo.close().await {
            tracing::warn!(error = %e, "Failed to close database connection");
        }

        if let Err(e) = &outcome {
            tracing::error!(method = %request.method, error = %e, "Post request failed");
        }
        outcome
    }
}

async fn dispatch(
    repo: &dyn PostRepository,
    request: &PostRequest,
) -> Result<HandlerResponse, HandlerError> {
    tracing::debug!(
        method = %request.method,
        id = request.path_id.as_deref().unwrap_or("-"),
        "Dispatching post request"
    );

    match &request.method {
        Method::Get => match request.path_id.as_deref() {
            Some(id) => get_post(repo, parse_id(id)?).await,
            None => list_posts(repo, &ListFilter::from_query(&request.query)).await,
        },
        Method::Post => create_post(repo, parse_body(request)?).await,
        Method::Put => {
            let Some(id) = request.path_id.as_deref() else {
                return Ok(HandlerResponse::id_required());
            };
            let input = parse_body(request)?;
            update_post(repo, parse_id(id)?, input).await
        }
        Method::Delete => match request.path_id.as_deref() {
            Some(id) => delete_post(repo, parse_id(id)?).await,
            None => Ok(HandlerResponse::id_required()),
        },
        Method::Options | Method::Other(_) => Ok(HandlerResponse::method_not_allowed()),
    }
}

async fn get_post(repo: &dyn PostRepository, id: PostId) -> Result<HandlerResponse, HandlerError> {
    match repo.find_by_id(id).await? {
        Some(post) => encode(200, &post),
        None => Ok(HandlerResponse::not_found()),
    }
}

async fn list_posts(
    repo: &dyn PostRepository,
    filter: &ListFilter,
) -> Result<HandlerResponse, HandlerError> {
    let posts = repo.list(filter).await?;
    tracing::debug!(count = posts.len(), ?filter, "Listed posts");
    encode(200, &posts)
}

async fn create_post(
    repo: &dyn PostRepository,
    input: PostInput,
) -> Result<HandlerResponse, HandlerError> {
    let post = repo.create(NewPost::from(input)).await?;
    tracing::info!(post_id = post.id, "Post created");
    encode(201, &post)
}

async fn update_post(
    repo: &dyn PostRepository,
    id: PostId,
    input: PostInput,
) -> Result<HandlerResponse, HandlerError> {
    match repo.replace(id, PostChanges::from(input)).await? {
        Some(post) => {
            tracing::info!(post_id = post.id, "Post updated");
            encode(200, &post)
        }
        None => Ok(HandlerResponse::not_found()),
    }
}

async fn delete_post(repo: &dyn PostRepository, id: PostId) -> Result<HandlerResponse, HandlerError> {
    match repo.delete(id).await? {
        Some(deleted) => {
            tracing::info!(post_id = deleted, "Post deleted");
            encode(200, &DeletedBody::new(deleted))
        }
        None => Ok(HandlerResponse::not_found()),
    }
}

fn parse_id(raw: &str) -> Result<PostId, HandlerError> {
    raw.trim()
        .parse()
        .map_err(|_| HandlerError::InvalidId(raw.to_string()))
}

fn parse_body(request: &PostRequest) -> Result<PostInput, HandlerError> {
    PostInput::from_body(request.body.as_deref()).map_err(HandlerError::MalformedBody)
}

fn encode<T: serde::Serialize + ?Sized>(
    status: u16,
    body: &T,
) -> Result<HandlerResponse, HandlerError> {
    HandlerResponse::json(status, body).map_err(HandlerError::Encode)
}
