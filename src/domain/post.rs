use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    /// Denormalized author display name, shown alongside the post.
    pub author: String,
    pub author_id: i64,
    /// Long-form display date, stamped once at creation.
    pub published_on: String,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub author: String,
    pub author_id: i64,
    pub published_on: String,
}

/// Full overwrite of the mutable post fields. `id` and `published_on`
/// never change after creation.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub author: String,
}

/// Formats a publication timestamp the way posts display it,
/// e.g. "April 05, 2024".
pub fn publication_date(at: DateTime<Utc>) -> String {
    at.format("%B %d, %Y").to_string()
}
