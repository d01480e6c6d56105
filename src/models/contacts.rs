use std::sync::LazyLock;

use regex::Regex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Channel label recorded when a submission does not name one.
pub const DIRECT_CONTACT_CHANNEL: &str = "direct website contact";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hard-coded email pattern is valid")
});

/// Read state of an inbound contact message, stored as a lowercase string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[sea_orm(string_value = "unread")]
    Unread,
    #[sea_orm(string_value = "read")]
    Read,
    #[sea_orm(string_value = "replied")]
    Replied,
}

/// SeaORM entity for the `contacts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: String,
    pub channel: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub channel: Option<String>,
    pub message: String,
}

impl CreateContact {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation(
                "contact name must not be empty".to_string(),
            ));
        }
        if self.message.trim().is_empty() {
            return Err(StoreError::Validation(
                "contact message must not be empty".to_string(),
            ));
        }
        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            return Err(StoreError::Validation(
                "contact email is not a valid address".to_string(),
            ));
        }
        Ok(())
    }

    /// Channel to record for this submission, falling back to the fixed
    /// direct-contact label.
    pub fn resolved_channel(&self) -> String {
        match &self.channel {
            Some(channel) if !channel.trim().is_empty() => channel.clone(),
            _ => DIRECT_CONTACT_CHANNEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContactStatus {
    pub status: ContactStatus,
}
