pub mod contacts;
pub mod maintenance;
pub mod projects;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Project routes (listing is public, mutations require the admin token) ──
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(projects::list_projects))
            .route(web::post().to(projects::create_project)),
    );
    cfg.service(
        web::resource("/projects/featured").route(web::get().to(projects::featured_projects)),
    );
    cfg.service(web::resource("/projects/tags").route(web::get().to(projects::online_tags)));
    cfg.service(
        web::resource("/projects/industries").route(web::get().to(projects::online_industries)),
    );
    cfg.service(
        web::resource("/projects/analysis-depths")
            .route(web::get().to(projects::online_analysis_depths)),
    );
    cfg.service(
        web::resource("/projects/batch-status")
            .route(web::put().to(projects::batch_project_status)),
    );
    cfg.service(
        web::resource("/projects/{id}")
            .route(web::get().to(projects::get_project))
            .route(web::put().to(projects::update_project))
            .route(web::delete().to(projects::delete_project)),
    );
    cfg.service(
        web::resource("/projects/{id}/status")
            .route(web::put().to(projects::set_project_status)),
    );

    // ── Contact routes (submission is public, the rest requires the admin token) ──
    cfg.service(
        web::resource("/contacts")
            .route(web::get().to(contacts::list_contacts))
            .route(web::post().to(contacts::create_contact)),
    );
    cfg.service(
        web::resource("/contacts/{id}/status")
            .route(web::put().to(contacts::update_contact_status)),
    );

    // ── Maintenance routes (admin only) ──
    cfg.service(
        web::scope("/maintenance")
            .route("/repair", web::post().to(maintenance::repair_schema))
            .route("/status", web::get().to(maintenance::database_status)),
    );
}
