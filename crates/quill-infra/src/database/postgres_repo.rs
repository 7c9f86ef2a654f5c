//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select, UpdateMany, Value,
};

use quill_core::domain::{
    ListFilter, NewPost, Operator, Post, PostChanges, PostColumn, PostId, Predicate,
    PredicateValue,
};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// Post repository bound to one open connection.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        _ => {
            let err_str = e.to_string();
            if err_str.contains("violates") || err_str.contains("duplicate") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

fn column(column: PostColumn) -> post::Column {
    match column {
        PostColumn::Category => post::Column::Category,
        PostColumn::Published => post::Column::Published,
    }
}

fn predicate_expr(predicate: Predicate) -> SimpleExpr {
    let value: Value = match predicate.value {
        PredicateValue::Text(text) => text.into(),
        PredicateValue::Bool(flag) => flag.into(),
    };

    match predicate.op {
        Operator::Eq => column(predicate.column).eq(value),
    }
}

/// `SELECT * FROM posts WHERE <predicates> ORDER BY created_at DESC`.
pub(crate) fn list_query(filter: &ListFilter) -> Select<PostEntity> {
    filter
        .predicates()
        .into_iter()
        .fold(PostEntity::find(), |query, p| query.filter(predicate_expr(p)))
        .order_by_desc(post::Column::CreatedAt)
}

/// Full overwrite of the mutable columns; NULL where the change is `None`.
pub(crate) fn replace_query(id: PostId, changes: PostChanges) -> UpdateMany<PostEntity> {
    PostEntity::update_many()
        .col_expr(post::Column::Title, Expr::value(changes.title))
        .col_expr(post::Column::Excerpt, Expr::value(changes.excerpt))
        .col_expr(post::Column::Content, Expr::value(changes.content))
        .col_expr(post::Column::Category, Expr::value(changes.category))
        .col_expr(post::Column::ImageUrl, Expr::value(changes.image_url))
        .col_expr(post::Column::VideoUrl, Expr::value(changes.video_url))
        .col_expr(post::Column::Published, Expr::value(changes.published))
        .col_expr(post::Column::UpdatedAt, Expr::current_timestamp().into())
        .filter(post::Column::Id.eq(id))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Post>, RepoError> {
        let result = list_query(filter).all(&self.db).await.map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn replace(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let updated = replace_query(id, changes)
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn delete(&self, id: PostId) -> Result<Option<PostId>, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((result.rows_affected > 0).then_some(id))
    }

    async fn close(self: Box<Self>) -> Result<(), RepoError> {
        self.db.close().await.map_err(map_db_err)?;
        tracing::debug!("Database connection closed");
        Ok(())
    }
}
