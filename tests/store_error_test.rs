//! Tests for the store error taxonomy and its HTTP mapping.
//!
//! Run with: `cargo test --test store_error_test`

use actix_web::ResponseError;
use actix_web::http::StatusCode;
use sea_orm::{DbErr, RuntimeErr};

use datafolio_backend::error::StoreError;

fn custom(message: &str) -> DbErr {
    DbErr::Custom(message.to_string())
}

#[test]
fn test_connection_failures_map_to_unavailable() {
    let err = StoreError::from(DbErr::Conn(RuntimeErr::Internal(
        "connection refused".to_string(),
    )));
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_other_storage_failures_stay_database_errors() {
    let err = StoreError::from(custom("syntax error at or near"));
    assert!(matches!(err, StoreError::Database(_)));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_status_codes_follow_the_taxonomy() {
    let validation = StoreError::Validation("project title must not be empty".to_string());
    assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

    let not_found = StoreError::NotFound("project 42 not found".to_string());
    assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

    let drift = StoreError::SchemaDrift {
        source: custom(r#"column "status" does not exist"#),
    };
    assert_eq!(drift.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let repair = StoreError::SchemaRepair {
        added: vec!["status".to_string()],
        source: custom("permission denied"),
    };
    assert_eq!(repair.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_every_error_carries_a_message() {
    let errors = [
        StoreError::Validation("bad input".to_string()),
        StoreError::NotFound("gone".to_string()),
        StoreError::SchemaDrift {
            source: custom(r#"column "featured" does not exist"#),
        },
        StoreError::SchemaRepair {
            added: vec![],
            source: custom("permission denied"),
        },
        StoreError::Unavailable(DbErr::Conn(RuntimeErr::Internal("down".to_string()))),
        StoreError::Database(custom("boom")),
    ];

    for err in errors {
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn test_drift_errors_keep_the_original_cause_visible() {
    let drift = StoreError::SchemaDrift {
        source: custom(r#"column "analysis_depth" of relation "projects" does not exist"#),
    };
    assert!(drift.to_string().contains("analysis_depth"));
}
