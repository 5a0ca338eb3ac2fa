//! In-memory repositories mirroring the Postgres implementations'
//! contracts (unique email, unique title, comment cascade), so service
//! and HTTP tests run without a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use minipress::application::auth_service::AuthService;
use minipress::application::content_service::ContentService;
use minipress::data::comment_repository::CommentRepository;
use minipress::data::post_repository::PostRepository;
use minipress::data::user_repository::UserRepository;
use minipress::domain::comment::{Comment, NewComment};
use minipress::domain::error::{DomainError, FieldError};
use minipress::domain::post::{NewPost, Post, PostUpdate};
use minipress::domain::user::{NewUser, User};
use minipress::infrastructure::security::SessionKeys;

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        let row = User {
            id: rows.len() as i64 + 1,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            role: user.role,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
struct PostTable {
    rows: Vec<Post>,
    next_id: i64,
}

#[derive(Default)]
pub struct InMemoryPosts {
    table: Mutex<PostTable>,
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|p| p.title == post.title) {
            return Err(DomainError::Validation(vec![FieldError::new(
                "title",
                "a post with this title already exists",
            )]));
        }
        table.next_id += 1;
        let row = Post {
            id: table.next_id,
            title: post.title,
            subtitle: post.subtitle,
            body: post.body,
            img_url: post.img_url,
            author: post.author,
            author_id: post.author_id,
            published_on: post.published_on,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn update(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, DomainError> {
        let mut table = self.table.lock().unwrap();
        if !table.rows.iter().any(|p| p.id == id) {
            return Ok(None);
        }
        if table
            .rows
            .iter()
            .any(|p| p.id != id && p.title == update.title)
        {
            return Err(DomainError::Validation(vec![FieldError::new(
                "title",
                "a post with this title already exists",
            )]));
        }
        let Some(row) = table.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.title = update.title;
        row.subtitle = update.subtitle;
        row.body = update.body;
        row.img_url = update.img_url;
        row.author = update.author;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        Ok(table.rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryComments {
    rows: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = Comment {
            id: rows.len() as i64 + 1,
            body: comment.body,
            user_id: comment.user_id,
            post_id: comment.post_id,
            author_name: comment.author_name,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn delete_for_post(&self, post_id: i64) -> Result<(), DomainError> {
        self.rows.lock().unwrap().retain(|c| c.post_id != post_id);
        Ok(())
    }
}

pub fn test_services() -> (AuthService, ContentService) {
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUsers::default());
    let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPosts::default());
    let comments: Arc<dyn CommentRepository> = Arc::new(InMemoryComments::default());

    let auth = AuthService::new(users, SessionKeys::new("test-secret".into(), 3600));
    let content = ContentService::new(posts, comments);
    (auth, content)
}
