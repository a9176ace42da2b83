// Adapters layer: concrete feedback sources for external systems.

pub mod csv_source;

pub use csv_source::CsvFeedbackSource;
