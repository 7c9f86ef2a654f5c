use chrono::NaiveDateTime;
use quill_shared::PostInput;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Storage-assigned post identifier (`SERIAL`).
pub type PostId = i32;

/// Post entity - a blog article as stored in the `posts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    /// Nullable: an update that omits `published` stores NULL.
    pub published: Option<bool>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Fields of a post about to be inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPost {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub published: bool,
}

impl From<PostInput> for NewPost {
    fn from(input: PostInput) -> Self {
        Self {
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            category: input.category,
            image_url: input.image_url,
            video_url: input.video_url,
            published: input.published.unwrap_or(false),
        }
    }
}

/// Full replacement of every mutable column.
///
/// `None` is written as NULL; there is no "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub published: Option<bool>,
}

impl From<PostInput> for PostChanges {
    fn from(input: PostInput) -> Self {
        Self {
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            category: input.category,
            image_url: input.image_url,
            video_url: input.video_url,
            published: input.published,
        }
    }
}
