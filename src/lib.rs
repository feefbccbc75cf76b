// NoteBuddy - meeting summary validation and normalization
//
// Turns untrusted summary candidates (fresh summarization output, stored
// documents, older hand-built objects) into canonical records and derives the
// views the front end shows.

pub mod config;
pub mod error;
pub mod summary;

pub use config::SummaryConfig;
pub use error::{ConversionError, ValidationError};
pub use summary::{
    is_valid_date, is_valid_duration, ActionEntry, ActionItem, DisplayRecord, Priority,
    SummaryModel, SummaryRecord,
};

/// Initialize env_logger to output to stderr (reads RUST_LOG env var)
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
