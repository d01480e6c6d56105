use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::AdminUser;
use crate::db::schema;
use crate::error::StoreError;

/// POST /api/maintenance/repair — run the schema guard against the projects
/// table (admin only). Running it against an up-to-date table is a no-op.
pub async fn repair_schema(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, StoreError> {
    let report = schema::ensure_projects_schema(db.get_ref()).await?;
    tracing::info!(summary = %report.summary(), "schema repair finished");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "columnsAdded": report.added,
        "message": report.summary(),
    })))
}

/// GET /api/maintenance/status — connectivity and table-existence report
/// (admin only). An unreachable database is reported in the body rather than
/// as a transport failure so the admin panel can render it.
pub async fn database_status(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, StoreError> {
    match schema::list_public_tables(db.get_ref()).await {
        Ok(tables) => {
            let projects_table_exists = tables.iter().any(|t| t == "projects");
            let contacts_table_exists = tables.iter().any(|t| t == "contacts");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "databaseConnected": true,
                "tables": tables,
                "projectsTableExists": projects_table_exists,
                "contactsTableExists": contacts_table_exists,
            })))
        }
        Err(err) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "databaseConnected": false,
            "error": err.to_string(),
        }))),
    }
}
