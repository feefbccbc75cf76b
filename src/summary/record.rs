// Summary models - canonical meeting summary record and action items
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coerce::truthy_text;

/// Urgency of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Case-insensitive parse of "High", "Medium" or "Low"
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

fn default_assignee() -> String {
    "TBD".to_string()
}

/// A task extracted from a meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    #[serde(default)]
    pub task: String,
    #[serde(default = "default_assignee")]
    pub assignee: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: Priority,
}

impl ActionItem {
    /// Build from a loose JSON object, defaulting whatever is missing
    pub fn from_map(map: &Map<String, Value>, default_assignee: &str) -> Self {
        let priority = map
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or_default();

        Self {
            task: truthy_text(map, "task").unwrap_or_default(),
            assignee: truthy_text(map, "assignee").unwrap_or_else(|| default_assignee.to_string()),
            due_date: truthy_text(map, "dueDate").unwrap_or_default(),
            priority,
        }
    }
}

/// An `actionItems` entry: structured, or free text from older producers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionEntry {
    Item(ActionItem),
    Text(String),
}

/// A canonical meeting summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Document id, present only for records loaded from storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub date: DateTime<Utc>,
    pub duration: String,
    pub participants: Vec<String>,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionEntry>,
    pub transcript: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_meeting_type")]
    pub meeting_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_meeting_type() -> String {
    "General".to_string()
}

impl SummaryRecord {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: title.into(),
            date: now,
            duration: "00:00".to_string(),
            participants: Vec::new(),
            key_points: Vec::new(),
            action_items: Vec::new(),
            transcript: String::new(),
            summary: String::new(),
            tags: Vec::new(),
            meeting_type: default_meeting_type(),
            location: String::new(),
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
            user_id: None,
        }
    }
}

impl Default for SummaryRecord {
    fn default() -> Self {
        Self::new("Untitled Meeting")
    }
}
