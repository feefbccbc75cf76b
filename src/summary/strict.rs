// Strict summary creation - validate first, then build with defaults
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::ValidationError;

use super::model::{FieldDefaults, SummaryModel};
use super::record::SummaryRecord;
use super::validation::validate_summary_data;

impl SummaryModel {
    /// Validate a candidate and build a canonical record from it
    ///
    /// Fails with every violation found. A truthy `participants` that is not
    /// an array is rejected here rather than coerced.
    pub fn create_summary(&self, candidate: &Value) -> Result<SummaryRecord, ValidationError> {
        self.create_summary_at(candidate, Utc::now())
    }

    pub(crate) fn create_summary_at(
        &self,
        candidate: &Value,
        now: DateTime<Utc>,
    ) -> Result<SummaryRecord, ValidationError> {
        let errors = validate_summary_data(candidate);
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        let empty = Map::new();
        let data = candidate.as_object().unwrap_or(&empty);
        let defaults = FieldDefaults {
            title: self.config().default_title.clone(),
            summary_fallback: None,
        };
        Ok(self.build_record(data, defaults, now))
    }

    /// Validation alone, without building a record
    pub fn validate(&self, candidate: &Value) -> Result<(), ValidationError> {
        let errors = validate_summary_data(candidate);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}
