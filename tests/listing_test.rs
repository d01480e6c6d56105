//! Tests for the in-memory listing engine: type/tag filtering and sorting.
//!
//! Everything here runs against hand-built rows. No running server or
//! database is needed.
//!
//! Run with: `cargo test --test listing_test`

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use datafolio_backend::listing::{
    self, ListOptions, SortKey, SortOrder, StatusFilter, matches_type,
};
use datafolio_backend::models::projects::{AnalysisDepth, Model, ProjectStatus};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

fn project(title: &str, project_type: &str, tags: &[&str]) -> Model {
    Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        image_url: "/images/cover.jpg".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        demo_url: String::new(),
        project_type: project_type.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        created_at: at(1, 12),
        updated_at: None,
        status: ProjectStatus::Online,
        featured: false,
        content: serde_json::json!({}),
        analysis_depth: AnalysisDepth::Exploratory,
        industry: "other".to_string(),
    }
}

fn options(project_type: Option<&str>, tag: Option<&str>) -> ListOptions {
    ListOptions {
        project_type: project_type.map(str::to_string),
        tag: tag.map(str::to_string),
        sort_by: SortKey::CreatedAt,
        order: SortOrder::Desc,
    }
}

#[test]
fn test_visualization_filter_matches_language_variants() {
    let rows = vec![
        project("dashboard", "visualization", &[]),
        project("chinese label", "可视化", &[]),
        project("case study", "Document", &[]),
    ];

    let result = listing::apply(rows.clone(), &options(Some("visualization"), None));
    let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["dashboard", "chinese label"]);

    let result = listing::apply(rows, &options(Some("document"), None));
    let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["case study"]);
}

#[test]
fn test_type_matching_is_case_insensitive_substring() {
    assert!(matches_type("Visualization", "visualization"));
    assert!(matches_type("VISUALIZATION", "visualization"));
    assert!(matches_type("图文案例分享", "document"));
    // The requested side is case-tolerant too.
    assert!(matches_type("document", "Document"));
}

#[test]
fn test_legacy_analysis_type_matches_neither_canonical_type() {
    assert!(!matches_type("analysis", "visualization"));
    assert!(!matches_type("analysis", "document"));
}

#[test]
fn test_empty_stored_type_never_matches() {
    assert!(!matches_type("", "visualization"));
    assert!(!matches_type("", "document"));
}

#[test]
fn test_all_type_skips_the_filter() {
    let rows = vec![
        project("a", "visualization", &[]),
        project("b", "analysis", &[]),
    ];
    let result = listing::apply(rows, &options(Some("all"), None));
    assert_eq!(result.len(), 2);
}

#[test]
fn test_unknown_requested_type_falls_back_to_itself() {
    let rows = vec![
        project("a", "analysis", &[]),
        project("b", "document", &[]),
    ];
    let result = listing::apply(rows, &options(Some("analysis"), None));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "a");
}

#[test]
fn test_tag_filter_requires_exact_membership() {
    let rows = vec![
        project("a", "document", &["Power BI", "运营分析"]),
        project("b", "document", &["Python"]),
        project("c", "document", &["Power"]),
    ];

    let result = listing::apply(rows.clone(), &options(None, Some("Power BI")));
    let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a"]);

    // The "all" sentinel disables tag filtering entirely.
    let result = listing::apply(rows, &options(None, Some("all")));
    assert_eq!(result.len(), 3);
}

#[test]
fn test_sort_is_stable_on_equal_created_at() {
    let mut first = project("first", "document", &[]);
    let mut second = project("second", "document", &[]);
    first.created_at = at(5, 9);
    second.created_at = at(5, 9);

    let result = listing::apply(vec![first, second], &options(None, None));
    let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn test_updated_at_sort_falls_back_to_created_at() {
    let mut stale = project("stale", "document", &[]);
    stale.created_at = at(10, 8);
    stale.updated_at = None;

    let mut fresh = project("fresh", "document", &[]);
    fresh.created_at = at(2, 8);
    fresh.updated_at = Some(at(20, 8));

    let opts = ListOptions {
        project_type: None,
        tag: None,
        sort_by: SortKey::UpdatedAt,
        order: SortOrder::Desc,
    };
    let result = listing::apply(vec![stale, fresh], &opts);
    let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["fresh", "stale"]);
}

#[test]
fn test_publish_date_sort_honors_order() {
    let mut older = project("older", "document", &[]);
    older.date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let mut newer = project("newer", "document", &[]);
    newer.date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    let mut opts = ListOptions {
        project_type: None,
        tag: None,
        sort_by: SortKey::Date,
        order: SortOrder::Desc,
    };
    let result = listing::apply(vec![older.clone(), newer.clone()], &opts);
    assert_eq!(result[0].title, "newer");

    opts.order = SortOrder::Asc;
    let result = listing::apply(vec![older, newer], &opts);
    assert_eq!(result[0].title, "older");
}

#[test]
fn test_query_parameter_parsing_defaults() {
    assert_eq!(SortKey::parse(None), SortKey::CreatedAt);
    assert_eq!(SortKey::parse(Some("created_at")), SortKey::CreatedAt);
    assert_eq!(SortKey::parse(Some("updated_at")), SortKey::UpdatedAt);
    // Anything else means the publish date.
    assert_eq!(SortKey::parse(Some("date")), SortKey::Date);
    assert_eq!(SortKey::parse(Some("最新发布")), SortKey::Date);

    assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
    assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);

    assert_eq!(StatusFilter::parse(None), StatusFilter::All);
    assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
    assert_eq!(
        StatusFilter::parse(Some("online")),
        StatusFilter::Only(ProjectStatus::Online)
    );
    assert_eq!(
        StatusFilter::parse(Some("offline")),
        StatusFilter::Only(ProjectStatus::Offline)
    );
}

#[test]
fn test_filtering_does_not_reorder_untouched_rows() {
    let mut a = project("a", "visualization", &[]);
    let mut b = project("b", "visualization", &[]);
    let mut c = project("c", "visualization", &[]);
    a.created_at = at(3, 0);
    b.created_at = at(3, 0);
    c.created_at = at(3, 0);

    let result = listing::apply(
        vec![a, b, c],
        &options(Some("visualization"), None),
    );
    let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}
