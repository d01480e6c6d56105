use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Publication state stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "offline")]
    Offline,
}

/// How deep the analysis behind a case study goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    #[sea_orm(string_value = "exploratory")]
    Exploratory,
    #[sea_orm(string_value = "diagnostic")]
    Diagnostic,
    #[sea_orm(string_value = "predictive")]
    Predictive,
    #[sea_orm(string_value = "prescriptive")]
    Prescriptive,
}

/// Canonical classification accepted for newly written projects.
///
/// The stored `type` column is a plain string because historical rows carry
/// legacy labels (Chinese variants, odd capitalization, a retired `analysis`
/// value). New rows only ever get one of these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Visualization,
    Document,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Visualization => "visualization",
            ProjectType::Document => "document",
        }
    }
}

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    pub tags: Vec<String>,
    #[sea_orm(column_type = "Text")]
    pub demo_url: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub project_type: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub content: Json,
    pub analysis_depth: AnalysisDepth,
    pub industry: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub demo_url: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub date: Date,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub content: Option<Json>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub analysis_depth: Option<AnalysisDepth>,
    #[serde(default)]
    pub industry: Option<String>,
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation(
                "project title must not be empty".to_string(),
            ));
        }
        if self.image_url.trim().is_empty() {
            return Err(StoreError::Validation(
                "project image URL must not be empty".to_string(),
            ));
        }
        if self.project_type == ProjectType::Visualization && self.demo_url.trim().is_empty() {
            return Err(StoreError::Validation(
                "visualization projects require a demo URL".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub demo_url: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub date: Option<Date>,
    pub featured: Option<bool>,
    pub content: Option<Json>,
    pub status: Option<ProjectStatus>,
    pub analysis_depth: Option<AnalysisDepth>,
    pub industry: Option<String>,
}

impl UpdateProject {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(StoreError::Validation(
                    "project title must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectStatus {
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchStatusUpdate {
    pub ids: Vec<Uuid>,
    pub status: ProjectStatus,
}

/// Query parameters accepted by the project listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Outcome of a single status transition.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub changed: bool,
    pub previous: ProjectStatus,
}
