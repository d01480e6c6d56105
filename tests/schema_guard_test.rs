//! Tests for the schema guard's pure parts: the missing-column error
//! classification, the required-column table, and the repair report.
//!
//! Run with: `cargo test --test schema_guard_test`

use std::collections::HashSet;

use sea_orm::DbErr;

use datafolio_backend::db::schema::{
    REQUIRED_COLUMNS, SchemaRepairReport, is_missing_column_error,
};

#[test]
fn test_missing_column_errors_are_recognized() {
    let err = DbErr::Custom(
        r#"ERROR: column "analysis_depth" of relation "projects" does not exist"#.to_string(),
    );
    assert!(is_missing_column_error(&err));

    // Postgres wording for a missing column in a WHERE clause.
    let err = DbErr::Custom(r#"ERROR: column "status" does not exist"#.to_string());
    assert!(is_missing_column_error(&err));
}

#[test]
fn test_classification_ignores_letter_case() {
    let err = DbErr::Custom(r#"Column "Featured" Does Not Exist"#.to_string());
    assert!(is_missing_column_error(&err));
}

#[test]
fn test_other_storage_errors_are_not_drift() {
    let err = DbErr::Custom("connection refused".to_string());
    assert!(!is_missing_column_error(&err));

    let err = DbErr::Custom(
        r#"ERROR: duplicate key value violates unique constraint "projects_pkey""#.to_string(),
    );
    assert!(!is_missing_column_error(&err));

    // Both halves of the message have to be present.
    let err = DbErr::Custom(r#"ERROR: relation "projects" does not exist"#.to_string());
    assert!(!is_missing_column_error(&err));
}

#[test]
fn test_required_columns_cover_the_write_path() {
    let names: Vec<&str> = REQUIRED_COLUMNS.iter().map(|c| c.name).collect();
    let expected = [
        "status",
        "updated_at",
        "analysis_depth",
        "industry",
        "content",
        "featured",
        "demo_url",
    ];

    assert_eq!(names.len(), expected.len());
    for name in expected {
        assert!(names.contains(&name), "missing required column {name}");
    }

    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len(), "duplicate required column");
}

#[test]
fn test_column_additions_are_race_tolerant_and_named_consistently() {
    for column in REQUIRED_COLUMNS {
        let expected_prefix = format!(
            "ALTER TABLE projects ADD COLUMN IF NOT EXISTS {} ",
            column.name
        );
        assert!(
            column.add.starts_with(&expected_prefix),
            "add statement for {} does not match its name: {}",
            column.name,
            column.add
        );
        assert!(
            column.add.contains("DEFAULT"),
            "column {} is added without a default",
            column.name
        );
    }
}

#[test]
fn test_only_updated_at_needs_a_backfill() {
    for column in REQUIRED_COLUMNS {
        if column.name == "updated_at" {
            let backfill = column.backfill.expect("updated_at should backfill");
            assert!(backfill.contains("created_at"));
        } else {
            assert!(column.backfill.is_none());
        }
    }
}

#[test]
fn test_repair_report_summary() {
    let report = SchemaRepairReport { added: vec![] };
    assert!(report.summary().contains("up to date"));

    let report = SchemaRepairReport {
        added: vec!["status".to_string(), "featured".to_string()],
    };
    let summary = report.summary();
    assert!(summary.contains("status"));
    assert!(summary.contains("featured"));
}
