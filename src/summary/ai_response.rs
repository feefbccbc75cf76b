//! Post-processing of summarization model output
//!
//! The summarization prompt asks the model for a JSON object with title,
//! participants, key points, action items, summary, transcript and tags.
//! Models do not always comply, so this module:
//! 1. Extracts a JSON object from the reply (bare, fenced, or embedded in prose)
//! 2. Drops empty action items and caps action items and key points
//! 3. Falls back to a fixed structure carrying the raw reply as the summary
//!
//! The result is a candidate for `convert_legacy_summary`, not a canonical record.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::coerce::{is_truthy, truthy};
use super::model::SummaryModel;

/// Duration stamped on fresh summaries; audio length is not known here
pub const UNKNOWN_DURATION: &str = "Unknown";

static JSON_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*\})\s*```").expect("Invalid regex")
});

impl SummaryModel {
    /// Turn a model reply into a summary candidate
    pub fn parse_ai_response(&self, text: &str, raw_transcript: &str) -> Value {
        self.parse_ai_response_at(text, raw_transcript, Utc::now())
    }

    pub(crate) fn parse_ai_response_at(
        &self,
        text: &str,
        raw_transcript: &str,
        now: DateTime<Utc>,
    ) -> Value {
        let mut structured = match extract_json_payload(text) {
            Some(map) => self.tidy_structured(map),
            None => {
                log::warn!("Summarization reply is not a JSON object, using fallback structure");
                fallback_structure(text)
            }
        };

        let transcript = truthy(&structured, "transcript")
            .cloned()
            .unwrap_or_else(|| Value::String(raw_transcript.to_string()));

        structured.insert(
            "date".to_string(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        structured.insert("duration".to_string(), Value::String(UNKNOWN_DURATION.to_string()));
        structured.insert("transcript".to_string(), transcript);

        Value::Object(structured)
    }

    fn tidy_structured(&self, mut map: Map<String, Value>) -> Map<String, Value> {
        let config = self.config();

        let action_items = match map.remove("actionItems") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter(is_meaningful_action_item)
                .take(config.max_action_items)
                .collect(),
            _ => Vec::new(),
        };
        map.insert("actionItems".to_string(), Value::Array(action_items));

        if let Some(Value::Array(points)) = map.get_mut("keyPoints") {
            points.truncate(config.max_key_points);
        }

        map
    }
}

/// Demo summary served when the summarization service is unavailable
pub fn mock_summary(now: DateTime<Utc>) -> Value {
    json!({
        "title": "Meeting Summary",
        "date": now.to_rfc3339_opts(SecondsFormat::Millis, true),
        "duration": "15:30",
        "participants": ["John Doe", "Jane Smith", "Mike Johnson"],
        "keyPoints": [
            "Discussed project timeline and deliverables",
            "Reviewed budget allocation for Q2",
            "Assigned tasks for next sprint",
            "Scheduled follow-up meeting for next week"
        ],
        "actionItems": [
            {
                "task": "Prepare budget report",
                "assignee": "John Doe",
                "dueDate": "2024-01-15",
                "priority": "High"
            },
            {
                "task": "Update project documentation",
                "assignee": "Jane Smith",
                "dueDate": "2024-01-12",
                "priority": "Medium"
            },
            {
                "task": "Schedule team meeting",
                "assignee": "Mike Johnson",
                "dueDate": "2024-01-10",
                "priority": "Low"
            }
        ],
        "transcript": concat!(
            "This is a mock transcript of the meeting. ",
            "A real transcript holds the transcribed audio of the uploaded recording."
        ),
        "summary": concat!(
            "The team discussed the current project status, ",
            "reviewed the budget for the upcoming quarter, ",
            "and assigned specific tasks to team members."
        ),
        "tags": ["Work", "Project", "Meeting"]
    })
}

fn fallback_structure(text: &str) -> Map<String, Value> {
    let value = json!({
        "title": "Meeting Summary",
        "participants": ["Participant 1", "Participant 2"],
        "keyPoints": ["Key points from the meeting"],
        "actionItems": [],
        "summary": text,
        "tags": ["meeting", "transcript"]
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn is_meaningful_action_item(item: &Value) -> bool {
    if !is_truthy(item) {
        return false;
    }
    match item {
        Value::String(s) => !s.trim().is_empty(),
        Value::Object(map) => map
            .get("task")
            .and_then(Value::as_str)
            .map_or(false, |task| !task.trim().is_empty()),
        _ => false,
    }
}

/// Find a JSON object in a model reply
fn extract_json_payload(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Some(map);
    }

    if let Some(caps) = JSON_BLOCK_RE.captures(trimmed) {
        if let Some(block) = caps.get(1) {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(block.as_str()) {
                return Some(map);
            }
        }
    }

    let start = trimmed.find('{')?;
    let candidate = extract_json_object(&trimmed[start..])?;
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Slice of `s` holding the first balanced JSON object
fn extract_json_object(s: &str) -> Option<&str> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match c {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 11, 0, 0).unwrap()
    }

    #[test]
    fn test_json_reply_is_tidied() {
        let model = SummaryModel::default();
        let reply = json!({
            "title": "Meeting Summary",
            "participants": ["Participant 1"],
            "keyPoints": ["a", "b", "c", "d", "e"],
            "actionItems": [
                {"task": "  "},
                "",
                "   ",
                {"task": "One"},
                "Two",
                {"assignee": "nobody"},
                {"task": "Three"},
                {"task": "Four"}
            ],
            "summary": "Short meeting."
        })
        .to_string();

        let candidate = model.parse_ai_response_at(&reply, "raw words", fixed_now());
        assert_eq!(candidate["keyPoints"], json!(["a", "b", "c", "d"]));
        assert_eq!(
            candidate["actionItems"],
            json!([{"task": "One"}, "Two", {"task": "Three"}])
        );
        assert_eq!(candidate["duration"], "Unknown");
        assert_eq!(candidate["date"], "2024-05-02T11:00:00.000Z");
        assert_eq!(candidate["transcript"], "raw words");
    }

    #[test]
    fn test_model_transcript_preferred() {
        let model = SummaryModel::default();
        let reply = r#"{"summary": "x", "transcript": "Participant 1: hi"}"#;
        let candidate = model.parse_ai_response_at(reply, "hi", fixed_now());
        assert_eq!(candidate["transcript"], "Participant 1: hi");
        assert_eq!(candidate["actionItems"], json!([]));
    }

    #[test]
    fn test_fenced_reply() {
        let model = SummaryModel::default();
        let reply = concat!(
            "Here you go:\n",
            "```json\n{\"title\": \"Kickoff\", \"keyPoints\": [\"Scope\"]}\n```"
        );
        let candidate = model.parse_ai_response_at(reply, "", fixed_now());
        assert_eq!(candidate["title"], "Kickoff");
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let model = SummaryModel::default();
        let reply = "Summary follows {\"title\": \"Weird {brace} title\"} thanks";
        let candidate = model.parse_ai_response_at(reply, "", fixed_now());
        assert_eq!(candidate["title"], "Weird {brace} title");
    }

    #[test]
    fn test_non_json_reply_uses_fallback() {
        let model = SummaryModel::default();
        let candidate = model.parse_ai_response_at("The team met briefly.", "raw", fixed_now());
        assert_eq!(candidate["title"], "Meeting Summary");
        assert_eq!(candidate["summary"], "The team met briefly.");
        assert_eq!(candidate["participants"], json!(["Participant 1", "Participant 2"]));
        assert_eq!(candidate["tags"], json!(["meeting", "transcript"]));
        assert_eq!(candidate["transcript"], "raw");
    }

    #[test]
    fn test_candidate_converts_to_record() {
        let model = SummaryModel::default();
        let candidate = model.parse_ai_response_at("not json", "raw", fixed_now());
        let record = model.convert_legacy_summary_at(&candidate, fixed_now()).unwrap();
        assert_eq!(record.duration, "Unknown");
        assert_eq!(record.date, fixed_now());
        assert_eq!(record.summary, "not json");
    }

    #[test]
    fn test_mock_summary_passes_strict_validation() {
        let model = SummaryModel::default();
        let record = model.create_summary(&mock_summary(fixed_now())).unwrap();
        assert_eq!(record.participants.len(), 3);
        assert_eq!(record.action_items.len(), 3);
        assert_eq!(record.duration, "15:30");
    }
}
