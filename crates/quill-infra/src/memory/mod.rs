//! In-memory post store - used when the `postgres` feature is off and in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};
use tokio::sync::RwLock;

use quill_core::domain::{ListFilter, NewPost, Post, PostChanges, PostId};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, PostStore};

#[derive(Default)]
struct Table {
    rows: Vec<Post>,
    last_id: PostId,
    last_stamp: Option<NaiveDateTime>,
}

impl Table {
    /// Current time at microsecond precision, strictly after every stamp
    /// handed out before.
    fn now(&mut self) -> NaiveDateTime {
        let mut now = Utc::now().naive_utc().trunc_subsecs(6);
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }
}

/// Posts table kept in process memory.
///
/// Every session opened from the same store sees the same rows. Data is lost
/// when the store is dropped.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    table: Arc<RwLock<Table>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    offline: bool,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every connection attempt fails.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Number of sessions opened so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of sessions closed so far.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn rows(&self) -> Vec<Post> {
        self.table.read().await.rows.clone()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn open(&self, database_url: &str) -> Result<Box<dyn PostRepository>, RepoError> {
        if self.offline {
            return Err(RepoError::Connection(format!(
                "could not connect to {database_url}"
            )));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemorySession {
            table: self.table.clone(),
            closed: self.closed.clone(),
        }))
    }
}

struct InMemorySession {
    table: Arc<RwLock<Table>>,
    closed: Arc<AtomicUsize>,
}

fn filter_matches(post: &Post, filter: &ListFilter) -> bool {
    let category_ok = filter
        .category
        .as_deref()
        .is_none_or(|c| post.category.as_deref() == Some(c));
    let published_ok = !filter.published_only || post.published == Some(true);
    category_ok && published_ok
}

#[async_trait]
impl PostRepository for InMemorySession {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        let mut posts: Vec<Post> = table
            .rows
            .iter()
            .filter(|p| filter_matches(p, filter))
            .cloned()
            .collect();

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let now = table.now();
        table.last_id += 1;

        let post = Post {
            id: table.last_id,
            title: new_post.title,
            excerpt: new_post.excerpt,
            content: new_post.content,
            category: new_post.category,
            image_url: new_post.image_url,
            video_url: new_post.video_url,
            published: Some(new_post.published),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(post.clone());

        Ok(post)
    }

    async fn replace(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut table = self.table.write().await;
        let Some(index) = table.rows.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let now = table.now();

        let post = &mut table.rows[index];
        post.title = changes.title;
        post.excerpt = changes.excerpt;
        post.content = changes.content;
        post.category = changes.category;
        post.image_url = changes.image_url;
        post.video_url = changes.video_url;
        post.published = changes.published;
        post.updated_at = now;

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> Result<Option<PostId>, RepoError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);

        Ok((table.rows.len() < before).then_some(id))
    }

    async fn close(self: Box<Self>) -> Result<(), RepoError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
