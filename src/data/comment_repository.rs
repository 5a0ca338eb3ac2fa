use crate::domain::comment::{Comment, NewComment};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError>;
    /// Comments under a post, oldest first, with commenter display names.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    /// Removes every comment under a post; part of the post-deletion
    /// cascade (the schema's ON DELETE CASCADE is the backstop).
    async fn delete_for_post(&self, post_id: i64) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError> {
        let (id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO comments (body, user_id, post_id)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(&comment.body)
        .bind(comment.user_id)
        .bind(comment.post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create comment: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(comment_id = id, post_id = comment.post_id, "comment created");
        Ok(Comment {
            id,
            body: comment.body,
            user_id: comment.user_id,
            post_id: comment.post_id,
            author_name: comment.author_name,
            created_at,
        })
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.body, c.user_id, c.post_id, u.name AS author_name, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list comments for post {}: {}", post_id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn delete_for_post(&self, post_id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete comments for post {}: {}", post_id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;
        Ok(())
    }
}
