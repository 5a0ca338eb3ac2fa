use actix_web::cookie::Cookie;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{LoginForm, RegisterForm};
use crate::presentation::utils::{CurrentUser, SESSION_COOKIE, see_other, session_cookie};

#[get("/register")]
pub async fn register_form() -> impl Responder {
    HttpResponse::Ok().json(json!({ "form": "register" }))
}

#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, DomainError> {
    let form = form.into_inner();
    let (_user, token) = auth.register(&form.email, &form.password, &form.name).await?;

    let mut response = see_other("/");
    response
        .add_cookie(&session_cookie(token, auth.keys().ttl_secs()))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(response)
}

#[get("/login")]
pub async fn login_form() -> impl Responder {
    HttpResponse::Ok().json(json!({ "form": "login" }))
}

#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, DomainError> {
    let form = form.into_inner();
    let (_user, token) = auth.login(&form.email, &form.password).await?;

    let mut response = see_other("/");
    response
        .add_cookie(&session_cookie(token, auth.keys().ttl_secs()))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(response)
}

#[get("/logout")]
pub async fn logout(_user: CurrentUser) -> Result<HttpResponse, DomainError> {
    let mut response = see_other("/");
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    response
        .add_removal_cookie(&cookie)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(response)
}
