// Summary validation - required fields, type rules, date and duration formats
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::coerce::truthy;

/// Fields every canonical summary must carry
pub const REQUIRED_FIELDS: [&str; 8] = [
    "title",
    "date",
    "duration",
    "participants",
    "keyPoints",
    "actionItems",
    "transcript",
    "summary",
];

// H:MM or HH:MM, hours 0-23, leading zero optional
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]|0[0-9]|1[0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid regex")
});

// Tried after replacing a trailing `Z` with `+0000`
const OFFSET_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
    // Date.prototype.toString() once the "(zone name)" suffix is cut
    "%a %b %d %Y %H:%M:%S GMT%z",
];

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%B %d, %Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%B %d, %Y", "%m/%d/%Y"];

/// Parse a timestamp string or a stored timestamp object
///
/// Strings may be RFC 3339 or other ISO 8601 date-times (with or without
/// seconds, basic or extended offsets; no offset reads as UTC), bare dates
/// (`2024-01-15`, `January 15, 2024`, `1/15/2024`), RFC 2822, or the output
/// of JavaScript's `Date.toString()`. Objects are document-store timestamps
/// of the form `{"seconds": .., "nanoseconds": ..}`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let nanos = u32::try_from(nanos).ok()?;
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let zoned = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+0000", rest),
        None => s.split(" (").next().unwrap_or(s).to_string(),
    };
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// True for timestamp strings and stored timestamp objects
pub fn is_valid_date(value: &Value) -> bool {
    parse_timestamp(value).is_some()
}

/// True only for strings shaped `H:MM` / `HH:MM` with hours 0-23
pub fn is_valid_duration(value: &Value) -> bool {
    match value {
        Value::String(s) => DURATION_RE.is_match(s),
        _ => false,
    }
}

/// Collect every rule violation in `data`
///
/// Missing required fields are reported first, in field order, followed by
/// type violations. Type rules only apply to truthy values; falsy ones are
/// later replaced by defaults.
pub fn validate_summary_data(data: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    let map = data.as_object();

    for field in REQUIRED_FIELDS {
        let present = map
            .and_then(|m| m.get(field))
            .map_or(false, |v| !v.is_null());
        if !present {
            errors.push(format!("Missing required field: {}", field));
        }
    }

    let map = match map {
        Some(map) => map,
        None => return errors,
    };

    let not_string = |key: &str| truthy(map, key).map_or(false, |v| !v.is_string());
    let not_array = |key: &str| truthy(map, key).map_or(false, |v| !v.is_array());

    if not_string("title") {
        errors.push("Title must be a string".to_string());
    }
    if truthy(map, "date").map_or(false, |v| !is_valid_date(v)) {
        errors.push("Date must be a valid ISO string or Date object".to_string());
    }
    if truthy(map, "duration").map_or(false, |v| !is_valid_duration(v)) {
        errors.push("Duration must be in HH:MM format".to_string());
    }
    if not_array("participants") {
        errors.push("Participants must be an array".to_string());
    }
    if not_array("keyPoints") {
        errors.push("Key points must be an array".to_string());
    }
    if not_array("actionItems") {
        errors.push("Action items must be an array".to_string());
    }
    if not_string("transcript") {
        errors.push("Transcript must be a string".to_string());
    }
    if not_string("summary") {
        errors.push("Summary must be a string".to_string());
    }
    if not_array("tags") {
        errors.push("Tags must be an array".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_duration_accepts_hours_0_to_23() {
        for ok in ["9:30", "09:30", "23:59", "0:00", "00:00", "05:07", "19:05"] {
            assert!(is_valid_duration(&json!(ok)), "{} should be valid", ok);
        }
    }

    #[test]
    fn test_duration_rejects_malformed() {
        let malformed = [
            json!("24:00"),
            json!("9:60"),
            json!("930"),
            json!(930),
            json!("9:5"),
            json!(" 9:30"),
            json!("009:30"),
        ];
        for bad in malformed {
            assert!(!is_valid_duration(&bad), "{} should be invalid", bad);
        }
    }

    #[test]
    fn test_date_strings() {
        assert!(is_valid_date(&json!("2024-01-15T10:30:00.000Z")));
        assert!(is_valid_date(&json!("2024-01-15T10:30:00+02:00")));
        assert!(is_valid_date(&json!("2024-01-15T10:30:00")));
        assert!(is_valid_date(&json!("2024-01-15")));
        assert!(is_valid_date(&json!("Mon, 15 Jan 2024 10:30:00 +0000")));
        assert!(!is_valid_date(&json!("2024-13-01")));
        assert!(!is_valid_date(&json!("next tuesday")));
        assert!(!is_valid_date(&json!(1705314600000_i64)));
        assert!(!is_valid_date(&json!(null)));
    }

    #[test]
    fn test_iso_variants_and_javascript_forms() {
        let at = |h, m| Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap();
        let cases = [
            ("2024-01-15T10:30Z", at(10, 30)),
            ("2024-01-15T10:30+0200", at(8, 30)),
            ("2024-01-15T10:30:00.000+0200", at(8, 30)),
            ("2024-01-15 10:30:00Z", at(10, 30)),
            ("Mon Jan 15 2024 10:30:00 GMT+0000", at(10, 30)),
            (
                "Mon Jan 15 2024 10:30:00 GMT+0100 (Central European Standard Time)",
                at(9, 30),
            ),
            ("January 15, 2024", at(0, 0)),
            ("Jan 15, 2024", at(0, 0)),
            ("January 15, 2024 10:30:00", at(10, 30)),
            ("1/15/2024", at(0, 0)),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_timestamp(&json!(text)), Some(expected), "{}", text);
        }
    }

    #[test]
    fn test_stored_timestamp_object() {
        let ts = json!({"seconds": 1705314600, "nanoseconds": 0});
        assert_eq!(
            parse_timestamp(&ts),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
        );
        assert!(is_valid_date(&json!({"_seconds": 1705314600, "_nanoseconds": 500})));
        assert!(!is_valid_date(&json!({"minutes": 3})));
    }

    #[test]
    fn test_reports_every_missing_field() {
        let errors = validate_summary_data(&json!({"title": "Sync", "summary": null}));
        assert_eq!(
            errors,
            vec![
                "Missing required field: date",
                "Missing required field: duration",
                "Missing required field: participants",
                "Missing required field: keyPoints",
                "Missing required field: actionItems",
                "Missing required field: transcript",
                "Missing required field: summary",
            ]
        );
    }

    #[test]
    fn test_non_object_candidate_misses_everything() {
        let errors = validate_summary_data(&json!("not a summary"));
        assert_eq!(errors.len(), REQUIRED_FIELDS.len());
    }

    #[test]
    fn test_type_violations_are_aggregated() {
        let errors = validate_summary_data(&json!({
            "title": 12,
            "date": "yesterday",
            "duration": "25:00",
            "participants": "Alice, Bob",
            "keyPoints": [],
            "actionItems": {"task": "x"},
            "transcript": "",
            "summary": ["not", "a", "string"],
            "tags": "work"
        }));
        assert_eq!(
            errors,
            vec![
                "Title must be a string",
                "Date must be a valid ISO string or Date object",
                "Duration must be in HH:MM format",
                "Participants must be an array",
                "Action items must be an array",
                "Summary must be a string",
                "Tags must be an array",
            ]
        );
    }

    #[test]
    fn test_falsy_values_skip_type_checks() {
        let errors = validate_summary_data(&json!({
            "title": "",
            "date": "",
            "duration": 0,
            "participants": false,
            "keyPoints": [],
            "actionItems": [],
            "transcript": "",
            "summary": ""
        }));
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }
}
