// Summary updates and the stored document projection
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::ConversionError;

use super::model::SummaryModel;
use super::record::SummaryRecord;

impl SummaryModel {
    /// Merge `patch` over `record` and refresh `updatedAt`
    ///
    /// Patch keys win. The merged object goes back through legacy
    /// normalization, so patches may use older shapes too.
    pub fn apply_update(
        &self,
        record: &SummaryRecord,
        patch: &Value,
    ) -> Result<SummaryRecord, ConversionError> {
        self.apply_update_at(record, patch, Utc::now())
    }

    pub(crate) fn apply_update_at(
        &self,
        record: &SummaryRecord,
        patch: &Value,
        now: DateTime<Utc>,
    ) -> Result<SummaryRecord, ConversionError> {
        let fields = patch
            .as_object()
            .ok_or_else(|| ConversionError::new("update must be a JSON object", patch.clone()))?;

        let mut merged = serde_json::to_value(record).map_err(|e| {
            ConversionError::new(format!("failed to serialize record: {}", e), patch.clone())
        })?;
        if let Value::Object(map) = &mut merged {
            for (key, value) in fields {
                map.insert(key.clone(), value.clone());
            }
            map.insert(
                "updatedAt".to_string(),
                Value::String(now.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            );
        }

        let mut updated = self.convert_legacy_summary_at(&merged, now)?;
        updated.updated_at = now;
        Ok(updated)
    }

    /// The per-user document written to storage
    pub fn storage_document(&self, record: &SummaryRecord) -> Value {
        let timestamp = |dt: &DateTime<Utc>| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        json!({
            "title": record.title,
            "transcript": record.transcript,
            "summary": record.summary,
            "participants": record.participants,
            "keyPoints": record.key_points,
            "actionItems": record.action_items,
            "tags": record.tags,
            "date": timestamp(&record.date),
            "createdAt": timestamp(&record.created_at),
            "updatedAt": timestamp(&record.updated_at),
        })
    }
}
