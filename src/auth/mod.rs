use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};

/// Wrapper type to store the admin token in Actix app data.
#[derive(Clone)]
pub struct AdminToken(pub String);

/// Extractor for requests presenting the admin bearer token.
///
/// Authentication here is a single shared token compared against
/// `ADMIN_TOKEN`: a request either is or is not from the admin. Use
/// `Option<AdminUser>` on routes that serve both public and admin callers.
pub struct AdminUser;

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

fn authorize(req: &HttpRequest) -> Result<AdminUser, Error> {
    let expected = req
        .app_data::<web::Data<AdminToken>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Admin token not configured"))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing Authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
    })?;

    if token != expected.0 {
        return Err(actix_web::error::ErrorUnauthorized("Invalid admin token"));
    }

    Ok(AdminUser)
}
