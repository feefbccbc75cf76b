// Derived views of a canonical summary - preview, search haystack, display
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::SummaryModel;
use super::record::{ActionEntry, SummaryRecord};

/// A summary shaped for list and detail screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub participants: Vec<String>,
    pub participant_count: usize,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionEntry>,
    pub action_item_count: usize,
    pub preview: String,
    pub tags: Vec<String>,
    pub meeting_type: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SummaryModel {
    /// Leading slice of the summary text, or transcript, for list views
    pub fn generate_preview(&self, record: &SummaryRecord) -> String {
        let config = self.config();
        let text = if !record.summary.is_empty() {
            record.summary.as_str()
        } else if !record.transcript.is_empty() {
            record.transcript.as_str()
        } else {
            config.preview_placeholder.as_str()
        };

        if text.chars().count() > config.preview_max_len {
            let mut preview: String = text.chars().take(config.preview_max_len).collect();
            preview.push_str("...");
            preview
        } else {
            text.to_string()
        }
    }

    /// Lower-cased haystack of every searchable field, space separated
    pub fn generate_search_text(&self, record: &SummaryRecord) -> String {
        let fields = [&record.title, &record.summary, &record.transcript]
            .into_iter()
            .chain(record.participants.iter())
            .chain(record.tags.iter())
            .chain([&record.meeting_type, &record.location]);

        fields
            .filter(|field| !field.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Case-insensitive substring match; a blank query matches everything
    pub fn matches_query(&self, record: &SummaryRecord, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.generate_search_text(record).contains(&query)
    }

    pub fn format_for_display(&self, record: &SummaryRecord) -> DisplayRecord {
        let config = self.config();
        DisplayRecord {
            id: record.id.clone(),
            title: record.title.clone(),
            date: self.format_timestamp(&record.date, &config.display_date_format),
            time: self.format_timestamp(&record.date, &config.display_time_format),
            duration: record.duration.clone(),
            participants: record.participants.clone(),
            participant_count: record.participants.len(),
            key_points: record.key_points.clone(),
            action_items: record.action_items.clone(),
            action_item_count: record.action_items.len(),
            preview: self.generate_preview(record),
            tags: record.tags.clone(),
            meeting_type: record.meeting_type.clone(),
            location: record.location.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
