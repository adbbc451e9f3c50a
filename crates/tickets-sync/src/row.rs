//! Issue payload → canonical row mapping.
//!
//! The search API returns wildly different shapes per field: scalars,
//! objects carrying `name`/`value`/`displayName`, or lists of either.
//! Every value is squeezed through one of three decode steps before it
//! touches the canonical schema, so the variant handling never leaks
//! out of this crate.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde_json::Value;
use tickets_core::dates::CANONICAL_DATETIME;
use tickets_core::schema::CanonicalRow;

// ── Field shape decoding ──────────────────────────────────────────────────────

/// Scalar passthrough: strings verbatim, numbers/bools rendered, null
/// and containers decode to `""`.
fn decode_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Named sub-key extraction: try `keys` in order on an object, fall
/// back to scalar decoding for anything that is not an object.
fn decode_named(value: &Value, keys: &[&str]) -> String {
    match value {
        Value::Object(map) => {
            for key in keys {
                if let Some(found) = map.get(*key).and_then(Value::as_str) {
                    if !found.is_empty() {
                        return found.to_string();
                    }
                }
            }
            String::new()
        }
        other => decode_scalar(other),
    }
}

/// First-of-list: multi-valued fields take their first element, decoded
/// by name; non-lists decode directly.
fn decode_first(value: &Value, keys: &[&str]) -> String {
    match value {
        Value::Array(items) => items
            .first()
            .map(|item| decode_named(item, keys))
            .unwrap_or_default(),
        other => decode_named(other, keys),
    }
}

// ── Date cleanup ──────────────────────────────────────────────────────────────

fn offset_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Trailing Z or ±HH[:]MM after a full timestamp.
    RE.get_or_init(|| Regex::new(r"(Z|[+-]\d{2}:?\d{2})$").unwrap())
}

/// Render an API timestamp (`2026-01-22T10:04:00.000-0300`) in the
/// canonical `YYYY-MM-DD HH:MM:SS` form.
///
/// Best-effort local-time assumption: the fraction and the trailing
/// offset marker are dropped, not converted. Anything unparseable is
/// returned verbatim, same leniency as the CSV normalizer.
pub fn format_api_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    // The fraction, when present, swallows the offset with it; a
    // fraction-less timestamp only needs its trailing marker removed.
    let without_fraction: String = match value.split_once('.') {
        Some((head, _)) => head.to_string(),
        None => offset_marker().replace(value, "").into_owned(),
    };

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&without_fraction, fmt) {
            return dt.format(CANONICAL_DATETIME).to_string();
        }
    }

    // Date-only fields (duedate) arrive as plain YYYY-MM-DD.
    if let Ok(date) = chrono::NaiveDate::parse_from_str(&without_fraction, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.format(CANONICAL_DATETIME).to_string();
        }
    }

    value.to_string()
}

// ── Issue mapping ─────────────────────────────────────────────────────────────

/// Map one search-API issue to the canonical schema.
///
/// Custom fields are resolved through the server-provided id → name
/// map; only "Team Name", "Sprint" and the product field are kept.
/// A missing or odd-shaped value always degrades to `""`, never aborts
/// the batch.
pub fn issue_to_row(issue: &Value, field_names: &HashMap<String, String>) -> CanonicalRow {
    static NULL: Value = Value::Null;
    let empty = Value::Object(serde_json::Map::new());
    let fields = issue.get("fields").unwrap_or(&empty);
    let get = |name: &str| fields.get(name).unwrap_or(&NULL);

    let mut row = CanonicalRow::default();
    row.summary = decode_scalar(get("summary")).trim().to_string();
    row.issue_key = decode_scalar(issue.get("key").unwrap_or(&NULL));
    row.issue_id = decode_scalar(issue.get("id").unwrap_or(&NULL));
    row.issue_type = decode_named(get("issuetype"), &["name"]);
    row.status = decode_named(get("status"), &["name"]);
    row.project_key = decode_named(get("project"), &["key"]);
    row.project_name = decode_named(get("project"), &["name"]);
    row.priority = decode_named(get("priority"), &["name"]);
    row.resolution = decode_named(get("resolution"), &["name"]);
    row.assignee = decode_named(get("assignee"), &["displayName", "emailAddress"]);
    row.reporter = decode_named(get("reporter"), &["displayName", "emailAddress"]);
    row.created = format_api_date(&decode_scalar(get("created")));
    row.updated = format_api_date(&decode_scalar(get("updated")));
    row.resolved = format_api_date(&decode_scalar(get("resolutiondate")));
    row.due_date = format_api_date(&decode_scalar(get("duedate")));
    row.status_category = fields
        .get("status")
        .and_then(|s| s.get("statusCategory"))
        .map(|sc| decode_named(sc, &["name"]))
        .unwrap_or_default();
    row.status_category_changed =
        format_api_date(&decode_scalar(get("statusCategoryChangedDate")));

    apply_custom_fields(&mut row, fields, field_names);
    row
}

/// Scan `customfield_*` entries and fill the three custom columns by
/// their server-resolved names.
fn apply_custom_fields(
    row: &mut CanonicalRow,
    fields: &Value,
    field_names: &HashMap<String, String>,
) {
    let Some(map) = fields.as_object() else {
        return;
    };

    for (key, value) in map {
        if !key.starts_with("customfield_") || value.is_null() {
            continue;
        }
        let name = field_names.get(key).map(String::as_str).unwrap_or(key);
        match name {
            "Team Name" => row.team_name = decode_named(value, &["name", "value"]),
            "Sprint" => row.sprint = decode_first(value, &["name"]),
            "Product/Area" | "Produto" => {
                row.product_area = decode_named(value, &["value", "name"])
            }
            _ => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tickets_core::schema::CANONICAL_FIELDS;

    fn names() -> HashMap<String, String> {
        [
            ("customfield_1", "Team Name"),
            ("customfield_2", "Sprint"),
            ("customfield_3", "Produto"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    // ── format_api_date ───────────────────────────────────────────────────────

    #[test]
    fn test_api_date_with_fraction_and_offset() {
        assert_eq!(
            format_api_date("2026-01-22T10:04:00.000-0300"),
            "2026-01-22 10:04:00"
        );
    }

    #[test]
    fn test_api_date_with_colon_offset() {
        assert_eq!(
            format_api_date("2026-01-22T10:04:00+00:00"),
            "2026-01-22 10:04:00"
        );
    }

    #[test]
    fn test_api_date_zulu() {
        assert_eq!(format_api_date("2026-01-22T10:04:00Z"), "2026-01-22 10:04:00");
    }

    #[test]
    fn test_api_date_plain_date() {
        assert_eq!(format_api_date("2026-01-22"), "2026-01-22 00:00:00");
    }

    #[test]
    fn test_api_date_empty() {
        assert_eq!(format_api_date(""), "");
    }

    #[test]
    fn test_api_date_garbage_passes_through() {
        assert_eq!(format_api_date("sometime soon"), "sometime soon");
    }

    // ── Decode steps ──────────────────────────────────────────────────────────

    #[test]
    fn test_decode_scalar_shapes() {
        assert_eq!(decode_scalar(&json!("text")), "text");
        assert_eq!(decode_scalar(&json!(42)), "42");
        assert_eq!(decode_scalar(&json!(true)), "true");
        assert_eq!(decode_scalar(&Value::Null), "");
        assert_eq!(decode_scalar(&json!({"a": 1})), "");
    }

    #[test]
    fn test_decode_named_key_priority() {
        let v = json!({"displayName": "Ana Lima", "emailAddress": "ana@example.com"});
        assert_eq!(decode_named(&v, &["displayName", "emailAddress"]), "Ana Lima");
        let v = json!({"emailAddress": "ana@example.com"});
        assert_eq!(decode_named(&v, &["displayName", "emailAddress"]), "ana@example.com");
    }

    #[test]
    fn test_decode_named_scalar_fallback() {
        assert_eq!(decode_named(&json!("plain"), &["name"]), "plain");
    }

    #[test]
    fn test_decode_first_takes_first_element() {
        let v = json!([{"name": "Sprint 4"}, {"name": "Sprint 5"}]);
        assert_eq!(decode_first(&v, &["name"]), "Sprint 4");
        let v = json!(["Sprint 7", "Sprint 8"]);
        assert_eq!(decode_first(&v, &["name"]), "Sprint 7");
        assert_eq!(decode_first(&json!([]), &["name"]), "");
    }

    // ── issue_to_row ──────────────────────────────────────────────────────────

    fn sample_issue() -> Value {
        json!({
            "id": 10042,
            "key": "PROJ-1",
            "fields": {
                "summary": "  Fix bug  ",
                "issuetype": {"name": "Bug"},
                "status": {"name": "Done", "statusCategory": {"name": "Concluído"}},
                "project": {"key": "PROJ", "name": "Checkout"},
                "priority": {"name": "High"},
                "resolution": {"name": "Fixed"},
                "assignee": {"displayName": "Ana Lima"},
                "reporter": {"emailAddress": "bruno@example.com"},
                "created": "2025-12-10T08:43:00.000-0300",
                "updated": "2026-01-22T10:04:00.000-0300",
                "resolutiondate": null,
                "duedate": "2026-02-01",
                "statusCategoryChangedDate": "2026-01-22T10:04:00.000-0300",
                "customfield_1": {"name": "Squad Pagamentos"},
                "customfield_2": [{"name": "Sprint 4"}, {"name": "Sprint 5"}],
                "customfield_3": {"value": "Checkout"},
                "customfield_99": {"value": "ignored"}
            }
        })
    }

    #[test]
    fn test_issue_maps_to_canonical_shape() {
        let row = issue_to_row(&sample_issue(), &names());
        assert_eq!(row.summary, "Fix bug");
        assert_eq!(row.issue_key, "PROJ-1");
        assert_eq!(row.issue_id, "10042");
        assert_eq!(row.issue_type, "Bug");
        assert_eq!(row.status, "Done");
        assert_eq!(row.status_category, "Concluído");
        assert_eq!(row.project_key, "PROJ");
        assert_eq!(row.project_name, "Checkout");
        assert_eq!(row.assignee, "Ana Lima");
        assert_eq!(row.reporter, "bruno@example.com");
        assert_eq!(row.created, "2025-12-10 08:43:00");
        assert_eq!(row.due_date, "2026-02-01 00:00:00");
        assert_eq!(row.resolved, "");
        assert_eq!(row.team_name, "Squad Pagamentos");
        assert_eq!(row.sprint, "Sprint 4");
        assert_eq!(row.product_area, "Checkout");
        assert_eq!(row.to_record().len(), CANONICAL_FIELDS.len());
    }

    #[test]
    fn test_empty_issue_degrades_to_empty_row() {
        let row = issue_to_row(&json!({}), &names());
        assert_eq!(row, CanonicalRow::default());
    }

    #[test]
    fn test_unknown_custom_fields_are_ignored() {
        let issue = json!({
            "key": "PROJ-2",
            "fields": {"customfield_77": {"value": "whatever"}}
        });
        let row = issue_to_row(&issue, &HashMap::new());
        assert_eq!(row.team_name, "");
        assert_eq!(row.product_area, "");
    }

    #[test]
    fn test_string_sprint_custom_field() {
        let issue = json!({
            "key": "PROJ-3",
            "fields": {"customfield_2": "Sprint 12"}
        });
        let row = issue_to_row(&issue, &names());
        assert_eq!(row.sprint, "Sprint 12");
    }
}
