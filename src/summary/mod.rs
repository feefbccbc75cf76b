// Summary module - canonical meeting summaries and their normalization
//
// Split into focused files:
// - record.rs: SummaryRecord, ActionItem, Priority
// - validation.rs: required fields, type rules, date and duration formats
// - coerce.rs: loose JSON value helpers
// - model.rs: SummaryModel service and shared record construction
// - strict.rs / legacy.rs: the two ways to obtain a canonical record
// - views.rs: preview, search text, display record
// - ai_response.rs: summarization output post-processing
// - update.rs: updates and storage projection

mod ai_response;
mod coerce;
mod legacy;
mod model;
mod record;
mod strict;
mod update;
mod validation;
mod views;

pub use record::{ActionEntry, ActionItem, Priority, SummaryRecord};
pub use validation::{
    is_valid_date, is_valid_duration, parse_timestamp, validate_summary_data, REQUIRED_FIELDS,
};
pub use model::SummaryModel;
pub use views::DisplayRecord;
pub use ai_response::{mock_summary, UNKNOWN_DURATION};
pub use coerce::is_truthy;
