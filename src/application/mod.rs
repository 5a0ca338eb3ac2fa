pub mod auth_service;
pub mod content_service;
