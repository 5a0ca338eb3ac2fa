use chrono::{DateTime, Utc};
use serde::Serialize;

/// A reader comment under a post. Comments are immutable once written
/// and disappear only when their post is deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
    pub post_id: i64,
    /// Commenting user's display name, joined in for the post view.
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub body: String,
    pub user_id: i64,
    pub author_name: String,
    pub post_id: i64,
}
