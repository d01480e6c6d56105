use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db::contacts as contact_db;
use crate::error::StoreError;
use crate::models::contacts::{CreateContact, UpdateContactStatus};

/// GET /api/contacts — list all contact submissions, newest first (admin only).
pub async fn list_contacts(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, StoreError> {
    let contacts = contact_db::get_all_contacts(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "contacts": contacts })))
}

/// POST /api/contacts — public contact form submission.
pub async fn create_contact(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContact>,
) -> Result<HttpResponse, StoreError> {
    let contact = contact_db::insert_contact(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(contact))
}

/// PUT /api/contacts/{id}/status — mark a submission unread/read/replied (admin only).
pub async fn update_contact_status(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateContactStatus>,
) -> Result<HttpResponse, StoreError> {
    let contact =
        contact_db::update_contact_status(db.get_ref(), path.into_inner(), body.into_inner().status)
            .await?;
    Ok(HttpResponse::Ok().json(contact))
}
