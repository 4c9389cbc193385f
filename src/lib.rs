//! Rule-based extraction of structured fields from funding announcements
//! (grant notices, RFPs, NOFOs).
//!
//! Pipeline: raw text → section segmenter → field extractors → insight
//! synthesizer → assembled [`AnalysisOutcome`].

pub mod analyzer;
pub mod clock;
pub mod document;
pub mod error;
pub mod insights;
pub mod loader;
pub mod parser;
pub mod record;
pub mod settings;

pub use analyzer::{Analyzer, DEFAULT_DOCUMENT_NAME};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::RawDocument;
pub use error::{ExtractError, LoadError};
pub use loader::{load, LoadedDocument};
pub use record::{AnalysisOutcome, AnalysisRecord, FailurePolicy};
pub use settings::Settings;
