use sea_orm::*;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::contacts::{self, ContactStatus, CreateContact};

/// Insert a new contact submission (always starts unread).
pub async fn insert_contact(
    db: &DatabaseConnection,
    input: CreateContact,
) -> Result<contacts::Model, StoreError> {
    input.validate()?;

    let channel = input.resolved_channel();
    let new_contact = contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        company: Set(input.company),
        channel: Set(channel),
        message: Set(input.message),
        status: Set(ContactStatus::Unread),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_contact.insert(db).await?)
}

/// Fetch all contact submissions, newest first.
pub async fn get_all_contacts(db: &DatabaseConnection) -> Result<Vec<contacts::Model>, StoreError> {
    Ok(contacts::Entity::find()
        .order_by_desc(contacts::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Update the read state of a contact submission.
pub async fn update_contact_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ContactStatus,
) -> Result<contacts::Model, StoreError> {
    let contact = contacts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("contact {id} not found")))?;

    let mut active: contacts::ActiveModel = contact.into();
    active.status = Set(status);

    Ok(active.update(db).await?)
}
