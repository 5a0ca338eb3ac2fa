use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub comment: String,
}

/// Post create/edit submission. On create the author field is ignored
/// and replaced by the administrator's display name; on edit it is
/// applied as submitted.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    #[serde(default)]
    pub author: String,
}
