// Summary model service - stateless holder of the normalization config
//
// Operations are split across files by concern, each adding an
// `impl SummaryModel` block:
// - strict.rs: validating creation
// - legacy.rs: lenient conversion of older shapes
// - views.rs: preview, search text, display record
// - ai_response.rs: post-processing of summarization output
// - update.rs: merging updates, storage projection

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::config::SummaryConfig;

use super::coerce::{action_entries, string_list, truthy, truthy_text, value_list};
use super::record::SummaryRecord;
use super::validation::parse_timestamp;

/// Normalizes summary candidates into canonical records
///
/// Holds configuration only, so one instance can be cloned and shared freely.
#[derive(Debug, Clone, Default)]
pub struct SummaryModel {
    config: SummaryConfig,
}

/// Per-path defaults that differ between strict and legacy construction
pub(crate) struct FieldDefaults {
    pub title: String,
    /// Key consulted for `summary` before falling back to the empty string
    pub summary_fallback: Option<&'static str>,
}

impl SummaryModel {
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Format a timestamp, falling back to RFC 3339 on a bad format string
    pub(crate) fn format_timestamp(&self, dt: &DateTime<Utc>, format: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", dt.format(format)).is_err() {
            log::warn!("Invalid timestamp format {:?}, using RFC 3339", format);
            return dt.to_rfc3339();
        }
        out
    }

    /// Build a record from an already-shaped map, filling defaults
    pub(crate) fn build_record(
        &self,
        data: &Map<String, Value>,
        defaults: FieldDefaults,
        now: DateTime<Utc>,
    ) -> SummaryRecord {
        let config = &self.config;

        let summary = truthy(data, "summary")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                defaults
                    .summary_fallback
                    .and_then(|key| truthy(data, key))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        SummaryRecord {
            id: truthy_text(data, "id"),
            title: truthy_text(data, "title").unwrap_or(defaults.title),
            date: self.timestamp_or(data, "date", now),
            duration: truthy(data, "duration")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| config.default_duration.clone()),
            participants: string_list(data.get("participants")),
            key_points: string_list(data.get("keyPoints")),
            action_items: action_entries(data.get("actionItems"), &config.default_assignee),
            transcript: truthy(data, "transcript")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default(),
            summary,
            tags: string_list(data.get("tags")),
            meeting_type: truthy(data, "meetingType")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| config.default_meeting_type.clone()),
            location: truthy(data, "location")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default(),
            attachments: value_list(data.get("attachments")),
            created_at: self.timestamp_or(data, "createdAt", now),
            updated_at: self.timestamp_or(data, "updatedAt", now),
            user_id: truthy_text(data, "userId"),
        }
    }

    fn timestamp_or(
        &self,
        data: &Map<String, Value>,
        key: &str,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        match truthy(data, key) {
            Some(value) => parse_timestamp(value).unwrap_or_else(|| {
                log::warn!("Unparseable {} {}, using current time", key, value);
                now
            }),
            None => now,
        }
    }
}
