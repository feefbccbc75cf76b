// Legacy summary conversion - coerce older shapes, never reject on type
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ConversionError;

use super::coerce::is_truthy;
use super::model::{FieldDefaults, SummaryModel};
use super::record::SummaryRecord;

impl SummaryModel {
    /// Normalize a summary from an older or inconsistent producer
    ///
    /// Only a candidate that is not a JSON object is an error. A non-string,
    /// non-array `participants` becomes empty instead of failing, and string
    /// durations are kept verbatim. A nested `summary` object is lifted to the
    /// top level and its own `summary` text is discarded, so the record falls
    /// back to `shortSummary`.
    pub fn convert_legacy_summary(
        &self,
        candidate: &Value,
    ) -> Result<SummaryRecord, ConversionError> {
        self.convert_legacy_summary_at(candidate, Utc::now())
    }

    pub(crate) fn convert_legacy_summary_at(
        &self,
        candidate: &Value,
        now: DateTime<Utc>,
    ) -> Result<SummaryRecord, ConversionError> {
        let source = candidate.as_object().ok_or_else(|| {
            ConversionError::new(
                format!("expected a JSON object, got {}", value_kind(candidate)),
                candidate.clone(),
            )
        })?;

        let mut data = source.clone();

        if let Some(Value::Object(nested)) = data.get("summary").cloned() {
            log::debug!("Legacy summary is nested, lifting {} fields", nested.len());
            for (key, value) in nested {
                data.insert(key, value);
            }
            data.remove("summary");
        }

        let split_names = match data.get("participants") {
            Some(Value::String(names)) => Some(
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| Value::String(name.to_string()))
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        };
        if let Some(split) = split_names {
            log::trace!("Split participants string into {} names", split.len());
            data.insert("participants".to_string(), Value::Array(split));
        }

        for key in ["keyPoints", "actionItems"] {
            if let Some(value) = data.get_mut(key) {
                if is_truthy(value) && !value.is_array() {
                    log::trace!("Wrapping scalar {} into a sequence", key);
                    let single = value.take();
                    *value = Value::Array(vec![single]);
                }
            }
        }

        let title = format!(
            "{}{}",
            self.config().legacy_title_prefix,
            self.format_timestamp(&now, &self.config().display_date_format)
        );
        let defaults = FieldDefaults {
            title,
            summary_fallback: Some("shortSummary"),
        };
        Ok(self.build_record(&data, defaults, now))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
