use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::application::content_service::ContentService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{CommentForm, PostForm};
use crate::presentation::utils::{AdminUser, CurrentUser, see_other};

#[get("/")]
pub async fn index(content: web::Data<ContentService>) -> Result<HttpResponse, DomainError> {
    let posts = content.list_posts().await?;
    Ok(HttpResponse::Ok().json(json!({ "posts": posts })))
}

#[get("/post/{id}")]
pub async fn show_post(
    content: web::Data<ContentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let post = content.get_post(post_id).await?;
    let comments = content.comments_for(post_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "post": post, "comments": comments })))
}

#[post("/post/{id}")]
pub async fn add_comment(
    user: CurrentUser,
    content: web::Data<ContentService>,
    path: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    content.add_comment(&user.0, post_id, &form.comment).await?;
    // back to the post view with a fresh, empty comment form
    Ok(see_other(&format!("/post/{}", post_id)))
}

#[get("/new-post")]
pub async fn new_post_form(_admin: AdminUser) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(json!({ "form": "new-post" })))
}

#[post("/new-post")]
pub async fn create_post(
    admin: AdminUser,
    content: web::Data<ContentService>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, DomainError> {
    content.create_post(&admin.0, form.into_inner()).await?;
    Ok(see_other("/"))
}

#[get("/edit-post/{id}")]
pub async fn edit_post_form(
    _admin: AdminUser,
    content: web::Data<ContentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = content.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "form": "edit-post", "post": post })))
}

#[post("/edit-post/{id}")]
pub async fn edit_post(
    _admin: AdminUser,
    content: web::Data<ContentService>,
    path: web::Path<i64>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    content.edit_post(post_id, form.into_inner()).await?;
    Ok(see_other(&format!("/post/{}", post_id)))
}

#[post("/delete/{id}")]
pub async fn delete_post(
    _admin: AdminUser,
    content: web::Data<ContentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    content.delete_post(path.into_inner()).await?;
    Ok(see_other("/"))
}
