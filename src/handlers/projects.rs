use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db::projects as project_db;
use crate::error::StoreError;
use crate::listing::{self, ListOptions, SortKey, SortOrder, StatusFilter};
use crate::models::projects::{
    BatchStatusUpdate, CreateProject, ProjectListQuery, ProjectStatus, UpdateProject,
    UpdateProjectStatus,
};

/// GET /api/projects — list projects with optional type/tag filtering and sorting.
///
/// Callers presenting the admin token may select `status=all|online|offline`;
/// everyone else only ever sees online projects, whatever they ask for.
pub async fn list_projects(
    admin: Option<AdminUser>,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, StoreError> {
    let status = if admin.is_some() {
        StatusFilter::parse(query.status.as_deref())
    } else {
        StatusFilter::Only(ProjectStatus::Online)
    };

    let projects = match status {
        StatusFilter::All => project_db::get_all_projects(db.get_ref()).await?,
        StatusFilter::Only(status) => {
            project_db::get_projects_by_status(db.get_ref(), status).await?
        }
    };

    let options = ListOptions {
        project_type: query.project_type.clone(),
        tag: query.tag.clone(),
        sort_by: SortKey::parse(query.sort_by.as_deref()),
        order: SortOrder::parse(query.order.as_deref()),
    };
    let projects = listing::apply(projects, &options);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total": projects.len(),
        "projects": projects,
    })))
}

/// POST /api/projects — create a new project (admin only).
pub async fn create_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> Result<HttpResponse, StoreError> {
    let project = project_db::insert_project(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// GET /api/projects/{id} — fetch a single project.
pub async fn get_project(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, StoreError> {
    let id = path.into_inner();
    let project = project_db::get_project_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("project {id} not found")))?;
    Ok(HttpResponse::Ok().json(project))
}

/// PUT /api/projects/{id} — partially update a project (admin only).
pub async fn update_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> Result<HttpResponse, StoreError> {
    let updated = project_db::update_project(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/projects/{id} — hard-delete a project (admin only).
pub async fn delete_project(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, StoreError> {
    let id = path.into_inner();
    project_db::delete_project(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// PUT /api/projects/{id}/status — flip a project online or offline (admin only).
///
/// Setting the status a project already has is a successful no-op and is
/// reported as `changed: false`.
pub async fn set_project_status(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProjectStatus>,
) -> Result<HttpResponse, StoreError> {
    let id = path.into_inner();
    let status = body.into_inner().status;
    let change = project_db::set_project_status(db.get_ref(), id, status.clone()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "id": id,
        "status": status,
        "changed": change.changed,
        "previousStatus": change.previous,
    })))
}

/// PUT /api/projects/batch-status — apply one status to many projects (admin only).
///
/// IDs that don't resolve or already carry the target status are skipped,
/// not errors; the response reports how many rows actually changed.
pub async fn batch_project_status(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<BatchStatusUpdate>,
) -> Result<HttpResponse, StoreError> {
    let input = body.into_inner();
    if input.ids.is_empty() {
        return Err(StoreError::Validation(
            "provide at least one project ID".to_string(),
        ));
    }

    let updated =
        project_db::set_projects_status(db.get_ref(), &input.ids, input.status.clone()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "status": input.status,
        "requested": input.ids.len(),
        "updated": updated,
    })))
}

/// GET /api/projects/featured — online projects marked as featured.
pub async fn featured_projects(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, StoreError> {
    let projects = project_db::get_featured_projects(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "projects": projects })))
}

/// GET /api/projects/tags — distinct tags across online projects.
pub async fn online_tags(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, StoreError> {
    let tags = project_db::get_online_tags(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "tags": tags })))
}

/// GET /api/projects/industries — distinct industries across online projects.
pub async fn online_industries(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, StoreError> {
    let industries = project_db::get_online_industries(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "industries": industries })))
}

/// GET /api/projects/analysis-depths — distinct analysis depths across online projects.
pub async fn online_analysis_depths(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, StoreError> {
    let depths = project_db::get_online_analysis_depths(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "depths": depths })))
}
