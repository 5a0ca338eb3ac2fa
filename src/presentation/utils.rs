use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};
use serde_json::json;

use crate::domain::error::DomainError;
use crate::domain::user::User;

pub const SESSION_COOKIE: &str = "session";

/// The identity the session middleware resolved for this request, if any.
/// As an extractor it demands a logged-in caller and surfaces
/// `Unauthenticated` (redirect to login) otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::Unauthenticated)),
        }
    }
}

/// Authorization guard around every post-mutation route: anyone who is
/// not the administrator, logged in or not, gets `Forbidden`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequest for AdminUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(CurrentUser(user)) if user.is_admin() => ready(Ok(AdminUser(user.clone()))),
            _ => ready(Err(DomainError::Forbidden)),
        }
    }
}

/// POST-redirect-GET: mutations answer 303 so a refresh re-fetches the
/// target instead of resubmitting the form.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(json!({ "redirect": location }))
}

pub fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}
