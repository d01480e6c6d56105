use std::collections::HashSet;
use std::future::Future;

use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::db::schema;
use crate::error::StoreError;
use crate::models::projects::{
    self, AnalysisDepth, CreateProject, ProjectStatus, StatusChange, UpdateProject,
};

/// Insert a new project. Status defaults to offline unless the caller sets one.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
) -> Result<projects::Model, StoreError> {
    input.validate()?;

    let now = chrono::Utc::now();
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        image_url: Set(input.image_url),
        tags: Set(input.tags),
        demo_url: Set(input.demo_url),
        project_type: Set(input.project_type.as_str().to_string()),
        date: Set(input.date),
        created_at: Set(now),
        updated_at: Set(Some(now)),
        status: Set(input.status.unwrap_or(ProjectStatus::Offline)),
        featured: Set(input.featured),
        content: Set(input.content.unwrap_or_else(|| serde_json::json!({}))),
        analysis_depth: Set(input.analysis_depth.unwrap_or(AnalysisDepth::Exploratory)),
        industry: Set(input.industry.unwrap_or_else(|| "other".to_string())),
    };

    Ok(new_project.insert(db).await?)
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, StoreError> {
    Ok(projects::Entity::find_by_id(id).one(db).await?)
}

/// Fetch all projects regardless of status.
pub async fn get_all_projects(db: &DatabaseConnection) -> Result<Vec<projects::Model>, StoreError> {
    Ok(projects::Entity::find().all(db).await?)
}

/// Fetch all projects with the given status.
pub async fn get_projects_by_status(
    db: &DatabaseConnection,
    status: ProjectStatus,
) -> Result<Vec<projects::Model>, StoreError> {
    Ok(projects::Entity::find()
        .filter(projects::Column::Status.eq(status))
        .all(db)
        .await?)
}

/// Fetch online projects marked as featured, newest publish date first.
pub async fn get_featured_projects(
    db: &DatabaseConnection,
) -> Result<Vec<projects::Model>, StoreError> {
    Ok(projects::Entity::find()
        .filter(projects::Column::Status.eq(ProjectStatus::Online))
        .filter(projects::Column::Featured.eq(true))
        .order_by_desc(projects::Column::Date)
        .all(db)
        .await?)
}

/// Update an existing project, preserving any field the input leaves out.
/// A write that trips over a missing column gets one repair-and-retry cycle.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, StoreError> {
    input.validate()?;

    match update_project_row(db, id, input.clone()).await {
        Err(StoreError::Database(err)) if schema::is_missing_column_error(&err) => {
            repair_then(db, err, update_project_row(db, id, input)).await
        }
        other => other,
    }
}

async fn update_project_row(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, StoreError> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("project {id} not found")))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(image_url) = input.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(tags) = input.tags {
        active.tags = Set(tags);
    }
    if let Some(demo_url) = input.demo_url {
        active.demo_url = Set(demo_url);
    }
    if let Some(project_type) = input.project_type {
        active.project_type = Set(project_type.as_str().to_string());
    }
    if let Some(date) = input.date {
        active.date = Set(date);
    }
    if let Some(featured) = input.featured {
        active.featured = Set(featured);
    }
    if let Some(content) = input.content {
        active.content = Set(content);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(analysis_depth) = input.analysis_depth {
        active.analysis_depth = Set(analysis_depth);
    }
    if let Some(industry) = input.industry {
        active.industry = Set(industry);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Delete a project by ID. Deleting an unknown (or already deleted) ID
/// reports not-found rather than failing hard.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<(), StoreError> {
    let result = projects::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound(format!("project {id} not found")));
    }
    Ok(())
}

/// Transition a project between online and offline. When the stored status
/// already equals the target, nothing is written and `updated_at` keeps its
/// value. Gets one repair-and-retry cycle on a missing column.
pub async fn set_project_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ProjectStatus,
) -> Result<StatusChange, StoreError> {
    match set_status_row(db, id, status.clone()).await {
        Err(StoreError::Database(err)) if schema::is_missing_column_error(&err) => {
            repair_then(db, err, set_status_row(db, id, status)).await
        }
        other => other,
    }
}

async fn set_status_row(
    db: &DatabaseConnection,
    id: Uuid,
    status: ProjectStatus,
) -> Result<StatusChange, StoreError> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("project {id} not found")))?;

    if project.status == status {
        return Ok(StatusChange {
            changed: false,
            previous: status,
        });
    }

    let previous = project.status.clone();
    let mut active: projects::ActiveModel = project.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await?;

    Ok(StatusChange {
        changed: true,
        previous,
    })
}

/// Apply a status to many projects in one statement and return how many rows
/// actually flipped. Unknown IDs and rows already at the target status simply
/// do not count; only a storage failure is an error. Gets one
/// repair-and-retry cycle on a missing column.
pub async fn set_projects_status(
    db: &DatabaseConnection,
    ids: &[Uuid],
    status: ProjectStatus,
) -> Result<u64, StoreError> {
    match set_status_rows(db, ids, status.clone()).await {
        Err(StoreError::Database(err)) if schema::is_missing_column_error(&err) => {
            repair_then(db, err, set_status_rows(db, ids, status)).await
        }
        other => other,
    }
}

async fn set_status_rows(
    db: &DatabaseConnection,
    ids: &[Uuid],
    status: ProjectStatus,
) -> Result<u64, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = projects::Entity::update_many()
        .col_expr(projects::Column::Status, Expr::value(status.clone()))
        .col_expr(projects::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(projects::Column::Id.is_in(ids.iter().copied()))
        .filter(projects::Column::Status.ne(status))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Run the schema guard once after a write failed on a missing column, then
/// poll the prepared retry exactly once. Anything short of a clean retry
/// surfaces the original write error as schema drift.
async fn repair_then<T, Fut>(
    db: &DatabaseConnection,
    cause: DbErr,
    retry: Fut,
) -> Result<T, StoreError>
where
    Fut: Future<Output = Result<T, StoreError>>,
{
    tracing::warn!(error = %cause, "write failed on a missing column, repairing projects schema");

    if let Err(repair_err) = schema::ensure_projects_schema(db).await {
        tracing::error!(error = %repair_err, "projects schema repair failed");
        return Err(StoreError::SchemaDrift { source: cause });
    }

    match retry.await {
        Err(StoreError::Database(retry_err)) => {
            tracing::error!(error = %retry_err, "write still failing after schema repair");
            Err(StoreError::SchemaDrift { source: cause })
        }
        other => other,
    }
}

// ── Aggregations over online projects ──

/// Distinct tags across online projects, in first-seen order.
pub async fn get_online_tags(db: &DatabaseConnection) -> Result<Vec<String>, StoreError> {
    let online = get_projects_by_status(db, ProjectStatus::Online).await?;

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for project in online {
        for tag in project.tags {
            if seen.insert(tag.clone()) {
                tags.push(tag);
            }
        }
    }
    Ok(tags)
}

/// Distinct industries across online projects, in first-seen order.
pub async fn get_online_industries(db: &DatabaseConnection) -> Result<Vec<String>, StoreError> {
    let online = get_projects_by_status(db, ProjectStatus::Online).await?;

    let mut seen = HashSet::new();
    let mut industries = Vec::new();
    for project in online {
        if seen.insert(project.industry.clone()) {
            industries.push(project.industry);
        }
    }
    Ok(industries)
}

/// Distinct analysis depths across online projects, in first-seen order.
pub async fn get_online_analysis_depths(
    db: &DatabaseConnection,
) -> Result<Vec<AnalysisDepth>, StoreError> {
    let online = get_projects_by_status(db, ProjectStatus::Online).await?;

    let mut depths: Vec<AnalysisDepth> = Vec::new();
    for project in online {
        if !depths.contains(&project.analysis_depth) {
            depths.push(project.analysis_depth);
        }
    }
    Ok(depths)
}
