use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::error::{DomainError, FieldError};
use crate::domain::post::{NewPost, Post, PostUpdate, publication_date};
use crate::domain::user::User;
use crate::presentation::dto::PostForm;

/// CRUD over posts and their comments. Mutations are guarded at the
/// presentation layer; this service assumes its caller is allowed.
#[derive(Clone)]
pub struct ContentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ContentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list().await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn comments_for(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        self.comments.list_for_post(post_id).await
    }

    /// Author name, author id and the publication date all come from the
    /// caller's identity and the clock, never from the form.
    #[instrument(skip(self, author, form), fields(author_id = author.id))]
    pub async fn create_post(&self, author: &User, form: PostForm) -> Result<Post, DomainError> {
        validate_post_form(&form)?;
        self.posts
            .create(NewPost {
                title: form.title,
                subtitle: form.subtitle,
                body: form.body,
                img_url: form.img_url,
                author: author.name.clone(),
                author_id: author.id,
                published_on: publication_date(Utc::now()),
            })
            .await
    }

    /// Overwrites the mutable fields in place; the publication date and
    /// id stay as they were at creation.
    #[instrument(skip(self, form))]
    pub async fn edit_post(&self, id: i64, form: PostForm) -> Result<Post, DomainError> {
        validate_post_form(&form)?;
        if form.author.trim().is_empty() {
            return Err(DomainError::Validation(vec![FieldError::new(
                "author",
                "must not be empty",
            )]));
        }
        self.posts
            .update(
                id,
                PostUpdate {
                    title: form.title,
                    subtitle: form.subtitle,
                    body: form.body,
                    img_url: form.img_url,
                    author: form.author,
                },
            )
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    /// Deletes a post and cascades to its comments.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        if self.posts.find_by_id(id).await?.is_none() {
            return Err(DomainError::PostNotFound(id));
        }
        self.comments.delete_for_post(id).await?;
        if !self.posts.delete(id).await? {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, user, text), fields(user_id = user.id))]
    pub async fn add_comment(
        &self,
        user: &User,
        post_id: i64,
        text: &str,
    ) -> Result<Comment, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(vec![FieldError::new(
                "comment",
                "must not be empty",
            )]));
        }
        // the post must exist before a comment may hang off it
        self.get_post(post_id).await?;

        let comment = self
            .comments
            .create(NewComment {
                body: text.to_string(),
                user_id: user.id,
                author_name: user.name.clone(),
                post_id,
            })
            .await?;

        info!(comment_id = comment.id, post_id, "comment added");
        Ok(comment)
    }
}

fn validate_post_form(form: &PostForm) -> Result<(), DomainError> {
    let mut fields = Vec::new();
    for (name, value) in [
        ("title", &form.title),
        ("subtitle", &form.subtitle),
        ("body", &form.body),
        ("img_url", &form.img_url),
    ] {
        if value.trim().is_empty() {
            fields.push(FieldError::new(name, "must not be empty"));
        }
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(fields))
    }
}
