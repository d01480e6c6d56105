pub use sea_orm_migration::prelude::*;

mod m20250412_000001_create_projects_table;
mod m20250412_000002_create_contacts_table;
mod m20250503_000001_add_publishing_fields_to_projects;
mod m20250611_000001_add_analysis_fields_to_projects;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250412_000001_create_projects_table::Migration),
            Box::new(m20250412_000002_create_contacts_table::Migration),
            Box::new(m20250503_000001_add_publishing_fields_to_projects::Migration),
            Box::new(m20250611_000001_add_analysis_fields_to_projects::Migration),
        ]
    }
}
