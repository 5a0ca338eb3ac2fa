use crate::domain::error::{DomainError, FieldError};
use crate::domain::post::{NewPost, Post, PostUpdate};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts a new post. A colliding title surfaces as a field-level
    /// validation error backed by the store's unique constraint.
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// All posts in storage order.
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    async fn update(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, DomainError>;
    /// Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

fn title_taken(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.constraint())
        .map(|c| c.contains("posts_title"))
        == Some(true)
}

fn duplicate_title_error() -> DomainError {
    DomainError::Validation(vec![FieldError::new(
        "title",
        "a post with this title already exists",
    )])
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, subtitle, body, img_url, author, author_id, published_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, subtitle, body, img_url, author, author_id, published_on
            "#,
        )
        .bind(&post.title)
        .bind(&post.subtitle)
        .bind(&post.body)
        .bind(&post.img_url)
        .bind(&post.author)
        .bind(post.author_id)
        .bind(&post.published_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if title_taken(&e) {
                duplicate_title_error()
            } else {
                error!("failed to create post: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(post_id = created.id, author_id = created.author_id, "post created");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, subtitle, body, img_url, author, author_id, published_on
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find post {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, subtitle, body, img_url, author, author_id, published_on
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list posts: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn update(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, DomainError> {
        let updated = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $1, subtitle = $2, body = $3, img_url = $4, author = $5
            WHERE id = $6
            RETURNING id, title, subtitle, body, img_url, author, author_id, published_on
            "#,
        )
        .bind(&update.title)
        .bind(&update.subtitle)
        .bind(&update.body)
        .bind(&update.img_url)
        .bind(&update.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if title_taken(&e) {
                duplicate_title_error()
            } else {
                error!("failed to update post {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        if updated.is_some() {
            info!(post_id = id, "post updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(post_id = id, "post deleted");
        }
        Ok(deleted)
    }
}
