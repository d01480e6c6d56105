//! In-memory filtering and sorting for project listings.
//!
//! Everything here is a pure function over rows already fetched from the
//! store: the same input always yields the same output and nothing is
//! written back.

use std::cmp::Ordering;

use crate::models::projects::{Model, ProjectStatus};

/// Which stored statuses a listing starts from. Public callers are always
/// pinned to `Only(Online)`; only admin callers get to pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> StatusFilter {
        match raw {
            Some("online") => StatusFilter::Only(ProjectStatus::Online),
            Some("offline") => StatusFilter::Only(ProjectStatus::Offline),
            _ => StatusFilter::All,
        }
    }
}

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Date,
}

impl SortKey {
    /// Anything other than the two audit timestamps sorts by publish date.
    pub fn parse(raw: Option<&str>) -> SortKey {
        match raw {
            Some("updated_at") => SortKey::UpdatedAt,
            Some("created_at") | None => SortKey::CreatedAt,
            Some(_) => SortKey::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Newest first unless the caller explicitly asks for ascending.
    pub fn parse(raw: Option<&str>) -> SortOrder {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Type and tag filters plus the requested ordering.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub project_type: Option<String>,
    pub tag: Option<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

/// Legacy labels that still count as the given canonical type. Stored types
/// are matched by lowercase *substring* against each synonym, which is
/// deliberately tolerant of the mixed labels present in old rows.
fn type_synonyms(canonical: &str) -> Option<&'static [&'static str]> {
    match canonical {
        "visualization" => Some(&["visualization", "可视化", "Visualization"]),
        "document" => Some(&["document", "图文案例", "Document", "文档"]),
        _ => None,
    }
}

/// Whether a stored type label matches the requested canonical type. An
/// unknown requested type falls back to matching against itself.
pub fn matches_type(stored: &str, requested: &str) -> bool {
    if stored.is_empty() {
        return false;
    }

    let stored = stored.to_lowercase();
    let requested = requested.to_lowercase();

    match type_synonyms(requested.as_str()) {
        Some(synonyms) => synonyms
            .iter()
            .any(|synonym| stored.contains(&synonym.to_lowercase())),
        None => stored.contains(requested.as_str()),
    }
}

/// Apply type filter, tag filter, and sort to an already-fetched list.
pub fn apply(mut projects: Vec<Model>, options: &ListOptions) -> Vec<Model> {
    if let Some(requested) = options.project_type.as_deref() {
        if !requested.eq_ignore_ascii_case("all") {
            projects.retain(|project| matches_type(&project.project_type, requested));
        }
    }

    if let Some(tag) = options.tag.as_deref() {
        if tag != "all" {
            projects.retain(|project| project.tags.iter().any(|t| t.as_str() == tag));
        }
    }

    sort_projects(&mut projects, options.sort_by, options.order);
    projects
}

/// Sort in place. The sort is stable, so rows the comparator cannot tell
/// apart keep their input order.
pub fn sort_projects(projects: &mut [Model], key: SortKey, order: SortOrder) {
    projects.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Model, b: &Model, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        // Rows that predate the updated_at column fall back to created_at.
        SortKey::UpdatedAt => a
            .updated_at
            .unwrap_or(a.created_at)
            .cmp(&b.updated_at.unwrap_or(b.created_at)),
        SortKey::Date => a.date.cmp(&b.date),
    }
}
